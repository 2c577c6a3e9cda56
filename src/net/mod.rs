//! HTTP session and fetch helpers.
//!
//! Every extractor talks to the network through a [`Session`], so the
//! cached reqwest session used at runtime can be swapped for an in-memory
//! one in tests.

mod cache;

pub use cache::{CachedResponse, ResponseCache};

use crate::config::HttpConfig;
use crate::error::Result;
use std::time::Duration;

/// Blocking page source shared by all extractors for one run
pub trait Session {
    /// GET `url` as text, served from the response cache when possible
    fn get_text(&self, url: &str) -> Result<String>;

    /// GET `url` as raw bytes, bypassing the response cache
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// reqwest session backed by an on-disk [`ResponseCache`]
pub struct CachedSession {
    client: reqwest::blocking::Client,
    cache: ResponseCache,
}

impl CachedSession {
    /// Create a session from HTTP settings and a cache
    pub fn new(config: &HttpConfig, cache: ResponseCache) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, cache })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Drop every cached response
    pub fn clear_cache(&self) -> Result<usize> {
        let removed = self.cache.clear()?;
        tracing::info!(removed, dir = %self.cache.dir().display(), "Response cache cleared");
        Ok(removed)
    }
}

impl Session for CachedSession {
    fn get_text(&self, url: &str) -> Result<String> {
        if let Some(hit) = self.cache.get(url) {
            tracing::debug!(url, stored_at = %hit.stored_at, "Cache hit");
            return Ok(hit.body);
        }

        let body = self.client.get(url).send()?.error_for_status()?.text()?;

        if let Err(e) = self.cache.put(url, &body) {
            tracing::warn!(url, error = %e, "Failed to store response in cache");
        }
        Ok(body)
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self.client.get(url).send()?.error_for_status()?.bytes()?;
        Ok(bytes.to_vec())
    }
}

/// Fetch a page, logging and swallowing any failure.
///
/// `None` means "skip this page"; callers decide whether that skips one
/// entry or the whole report.
pub fn get_response(session: &dyn Session, url: &str) -> Option<String> {
    match session.get_text(url) {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::error!(url, error = %e, "Error loading page");
            None
        }
    }
}
