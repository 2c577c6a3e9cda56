//! On-disk response cache.
//!
//! One JSON file per request, named by the SHA-256 of the request key.
//! Entries never expire; `clear` is the only way to drop them.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// A stored response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    pub url: String,
    pub body: String,
    pub stored_at: DateTime<Utc>,
}

/// Key-value store of prior responses, keyed by request
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Open the cache rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a GET of `url`
    pub fn key(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"GET ");
        hasher.update(url.as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
        format!("{}.json", hex)
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.join(Self::key(url))
    }

    /// Look up a stored body. Unreadable entries count as misses.
    pub fn get(&self, url: &str) -> Option<CachedResponse> {
        let path = self.entry_path(url);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str::<CachedResponse>(&contents) {
            Ok(entry) if entry.url == url => Some(entry),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Ignoring corrupt cache entry");
                None
            }
        }
    }

    /// Store a body for `url`, replacing any previous entry
    pub fn put(&self, url: &str, body: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let entry = CachedResponse {
            url: url.to_string(),
            body: body.to_string(),
            stored_at: Utc::now(),
        };
        fs::write(self.entry_path(url), serde_json::to_string(&entry)?)?;
        Ok(())
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |e| e == "json") {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        fs::read_dir(&self.dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().extension().map_or(false, |x| x == "json"))
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_miss_on_empty_cache() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().join("cache"));
        assert!(cache.get("https://docs.python.org/3/").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_then_get() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().join("cache"));
        cache.put("https://docs.python.org/3/", "<html></html>").unwrap();

        let hit = cache.get("https://docs.python.org/3/").unwrap();
        assert_eq!(hit.body, "<html></html>");
        assert_eq!(hit.url, "https://docs.python.org/3/");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_differ_per_url() {
        let a = ResponseCache::key("https://peps.python.org/pep-0001/");
        let b = ResponseCache::key("https://peps.python.org/pep-0002/");
        assert_ne!(a, b);
        assert!(a.ends_with(".json"));
        assert_eq!(a.len(), 64 + ".json".len());
    }

    #[test]
    fn test_put_replaces_entry() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path());
        cache.put("https://peps.python.org/", "old").unwrap();
        cache.put("https://peps.python.org/", "new").unwrap();
        assert_eq!(cache.get("https://peps.python.org/").unwrap().body, "new");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path());
        let url = "https://docs.python.org/3/download.html";
        fs::write(dir.path().join(ResponseCache::key(url)), "{not json").unwrap();
        assert!(cache.get(url).is_none());
    }

    #[test]
    fn test_clear_removes_everything() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().join("cache"));
        cache.put("https://docs.python.org/3/", "a").unwrap();
        cache.put("https://peps.python.org/", "b").unwrap();

        assert_eq!(cache.clear().unwrap(), 2);
        assert!(cache.is_empty());
        assert!(cache.get("https://docs.python.org/3/").is_none());
    }

    #[test]
    fn test_clear_missing_dir() {
        let dir = TempDir::new().unwrap();
        let cache = ResponseCache::new(dir.path().join("never-created"));
        assert_eq!(cache.clear().unwrap(), 0);
    }
}
