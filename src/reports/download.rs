// Download: fetch the A4 PDF documentation archive

use crate::config::Config;
use crate::error::{Error, Result};
use crate::html::{self, Attrs};
use crate::net::{get_response, Session};
use regex::Regex;
use scraper::Html;
use std::fs;
use std::path::PathBuf;
use url::Url;

const ARCHIVE_PATTERN: &str = r".+pdf-a4\.zip$";

/// Final path segment of the archive URL
pub fn archive_file_name(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::NoFileName(url.to_string()))
}

/// Locate the archive link on the downloads page, resolved against `page_url`
pub fn find_archive_url(body: &str, page_url: &Url) -> Result<Url> {
    let doc = Html::parse_document(body);
    let table = html::find_tag(doc.root_element(), "table", &Attrs::new())?;
    let anchor = html::find_tag(table, "a", &Attrs::pattern("href", Regex::new(ARCHIVE_PATTERN)?))?;
    Ok(page_url.join(html::attr(anchor, "href")?)?)
}

/// Save the archive under the downloads directory. Returns the saved path,
/// or `None` when the downloads page itself could not be loaded.
pub fn download(session: &dyn Session, config: &Config) -> Result<Option<PathBuf>> {
    let downloads_url = config.site.main_url()?.join("download.html")?;
    let Some(body) = get_response(session, downloads_url.as_str()) else {
        return Ok(None);
    };

    let archive_url = find_archive_url(&body, &downloads_url)?;
    let file_name = archive_file_name(&archive_url)?;

    let downloads_dir = config.paths.downloads();
    fs::create_dir_all(&downloads_dir)?;
    let archive_path = downloads_dir.join(file_name);

    let content = session.get_bytes(archive_url.as_str())?;
    fs::write(&archive_path, &content)?;

    tracing::info!(path = %archive_path.display(), bytes = content.len(), "Archive downloaded and saved");
    Ok(Some(archive_path))
}
