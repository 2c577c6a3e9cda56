// Shared helpers for integration tests

#![allow(dead_code)]

use pydoc_scrape::{Config, Error, Result, Session};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const MAIN_URL: &str = "https://docs.python.org/3/";
pub const PEP_URL: &str = "https://peps.python.org/";

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {}", path.display(), e))
}

/// In-memory site: unknown URLs fail like a 404
#[derive(Default)]
pub struct FakeSession {
    pages: HashMap<String, String>,
    files: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), body.into());
        self
    }

    pub fn file(mut self, url: &str, bytes: &[u8]) -> Self {
        self.files.insert(url.to_string(), bytes.to_vec());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Session for FakeSession {
    fn get_text(&self, url: &str) -> Result<String> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| Error::other(format!("404 Not Found: {}", url)))
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| Error::other(format!("404 Not Found: {}", url)))
    }
}

/// Default config with every local directory under `base`
pub fn config_in(base: &Path) -> Config {
    let mut config = Config::default();
    config.paths.base_dir = base.to_path_buf();
    config
}

/// Minimal PEP page with a field list carrying `status`
pub fn pep_page(number: u32, status: &str) -> String {
    format!(
        r#"<html><body><section id="pep-content">
<h1 class="page-title">PEP {number} – Example</h1>
<dl class="rfc2822 field-list simple">
<dt class="field-odd">Author<span class="colon">:</span></dt>
<dd class="field-odd">Someone</dd>
<dt class="field-even">Status<span class="colon">:</span></dt>
<dd class="field-even"><abbr title="status">{status}</abbr></dd>
<dt class="field-odd">Type<span class="colon">:</span></dt>
<dd class="field-odd">Standards Track</dd>
</dl></section></body></html>"#
    )
}

/// PEP index with one row per `(type/status cell, pep number)`
pub fn pep_index(rows: &[(&str, u32)]) -> String {
    let body: String = rows
        .iter()
        .map(|(cell, number)| {
            format!(
                r#"<tr class="row-odd"><td><abbr title="type, status">{cell}</abbr></td><td class="pep"><a class="pep reference internal" href="pep-{number:04}/" title="PEP {number}">{number}</a></td><td>Title {number}</td></tr>
"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
<section id="introduction"><table><tbody><tr><td>XX</td></tr></tbody></table></section>
<section id="numerical-index"><h2>Numerical Index</h2>
<table class="pep-zero-table docutils align-default">
<thead><tr><th>Type/Status</th><th>PEP</th><th>Title</th></tr></thead>
<tbody>
{body}</tbody></table></section></body></html>"#
    )
}

pub fn pep_page_url(number: u32) -> String {
    format!("{}pep-{:04}/", PEP_URL, number)
}
