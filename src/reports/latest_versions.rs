// Latest Versions: documentation link, version and status per release line

use super::{ReportTable, TableRow};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::html::{self, Attrs};
use crate::net::{get_response, Session};
use regex::Regex;
use scraper::Html;
use serde::Serialize;
use std::sync::LazyLock;

const ALL_VERSIONS_MARKER: &str = "All versions";

static RE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Python (?P<version>\d+\.\d+) \((?P<status>.*)\)")
        .expect("invalid regex: version anchor")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRow {
    pub link: String,
    pub version: String,
    pub status: String,
}

impl TableRow for VersionRow {
    const HEADER: &'static [&'static str] = &["Documentation link", "Version", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![self.link.clone(), self.version.clone(), self.status.clone()]
    }
}

impl VersionRow {
    /// Split `Python X.Y (status)`; anything else keeps the raw text as version
    pub fn from_anchor(link: &str, text: &str) -> Self {
        let (version, status) = match RE_VERSION.captures(text) {
            Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
            None => (text.to_string(), String::new()),
        };
        Self {
            link: link.to_string(),
            version,
            status,
        }
    }
}

pub fn latest_versions(session: &dyn Session, config: &Config) -> Result<Option<ReportTable<VersionRow>>> {
    let main_url = config.site.main_url()?;
    let Some(body) = get_response(session, main_url.as_str()) else {
        return Ok(None);
    };
    let doc = Html::parse_document(&body);

    let sidebar = html::find_tag(doc.root_element(), "div", &Attrs::class("sphinxsidebarwrapper"))?;
    let versions_list = html::find_all(sidebar, "ul", &Attrs::new())
        .into_iter()
        .find(|ul| html::text(*ul).contains(ALL_VERSIONS_MARKER))
        .ok_or_else(|| {
            tracing::error!(marker = ALL_VERSIONS_MARKER, "Version list not found in sidebar");
            Error::MarkerNotFound {
                tag: "ul".to_string(),
                marker: ALL_VERSIONS_MARKER.to_string(),
            }
        })?;

    let mut rows = Vec::new();
    for anchor in html::find_all(versions_list, "a", &Attrs::new()) {
        let link = html::attr(anchor, "href")?;
        rows.push(VersionRow::from_anchor(link, &html::text(anchor)));
    }

    Ok(Some(ReportTable::new(rows)))
}
