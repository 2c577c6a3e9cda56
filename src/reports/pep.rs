//! PEP status counts.
//!
//! Walks the numerical index, opens every PEP page, and counts the status
//! printed on the page itself. The status code in the index table is only
//! used to check the page against the expected-status table; disagreement
//! is logged and never changes the count.

use super::{ReportTable, TableRow};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::html::{self, Attrs};
use crate::net::{get_response, Session};
use crate::progress;
use scraper::Html;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const TOTAL_LABEL: &str = "Total";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    pub status: String,
    pub count: usize,
}

impl TableRow for StatusRow {
    const HEADER: &'static [&'static str] = &["Status", "Count"];

    fn cells(&self) -> Vec<String> {
        vec![self.status.clone(), self.count.to_string()]
    }
}

/// Status code of an index row: the type/status cell without its leading
/// type letter. Empty for PEPs whose cell carries only the type.
pub fn status_code(cell_text: &str) -> String {
    cell_text.trim().chars().skip(1).collect()
}

/// One index row joined with its PEP page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PepRecord {
    pub code: String,
    pub table_cell: String,
    pub page_status: String,
    pub url: String,
}

/// Disagreement between the index table and a PEP page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Page status is not one the code allows
    Mismatch {
        url: String,
        status: String,
        expected: Vec<String>,
    },
    /// Code has no entry in the expected-status table
    UnknownCode { url: String, code: String },
}

impl Finding {
    pub fn log(&self) {
        match self {
            Finding::Mismatch { url, status, expected } => {
                tracing::warn!(url = %url, status = %status, expected = ?expected, "Mismatched statuses");
            }
            Finding::UnknownCode { url, code } => {
                tracing::error!(url = %url, code = %code, "Unknown status code");
            }
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Mismatch { url, status, expected } => write!(
                f,
                "{}: page status {:?}, expected one of {:?}",
                url, status, expected
            ),
            Finding::UnknownCode { url, code } => write!(f, "{}: unknown status code {:?}", url, code),
        }
    }
}

impl PepRecord {
    /// Check the page status against the statuses allowed for the code
    pub fn reconcile(&self, expected_status: &BTreeMap<String, Vec<String>>) -> Option<Finding> {
        match expected_status.get(&self.code) {
            Some(expected) if expected.contains(&self.page_status) => None,
            Some(expected) => Some(Finding::Mismatch {
                url: self.url.clone(),
                status: self.page_status.clone(),
                expected: expected.clone(),
            }),
            None => Some(Finding::UnknownCode {
                url: self.url.clone(),
                code: self.code.clone(),
            }),
        }
    }
}

/// Count per status, in first-seen order, with a separate running total
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: Vec<(String, usize)>,
    total: usize,
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(s, _)| s == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
        self.total += 1;
    }

    pub fn get(&self, status: &str) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| s == status)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Sum over all buckets; always equals `total`
    pub fn bucket_sum(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn statuses(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(s, count)| (s.as_str(), *count))
    }

    /// Bucket rows followed by the `Total` row
    pub fn into_rows(self) -> Vec<StatusRow> {
        let total = self.total;
        self.counts
            .into_iter()
            .map(|(status, count)| StatusRow { status, count })
            .chain(std::iter::once(StatusRow {
                status: TOTAL_LABEL.to_string(),
                count: total,
            }))
            .collect()
    }
}

/// Tally plus every finding raised during the walk
#[derive(Debug, Clone, Default)]
pub struct PepSummary {
    pub tally: StatusTally,
    pub findings: Vec<Finding>,
}

/// Status printed next to the `Status` label of a PEP page
pub fn page_status(body: &str) -> Result<String> {
    let doc = Html::parse_document(body);
    let label = html::find_label(doc.root_element(), "Status")?;
    let value = html::next_element(label)?;
    Ok(html::text(value).trim().to_string())
}

struct IndexRow {
    cell: String,
    url: String,
}

fn index_rows(body: &str, config: &Config) -> Result<Vec<IndexRow>> {
    let pep_url = config.site.pep_url()?;
    let doc = Html::parse_document(body);
    let section = html::find_tag(doc.root_element(), "section", &Attrs::id("numerical-index"))?;
    let tbody = html::find_tag(section, "tbody", &Attrs::new())?;

    let mut rows = Vec::new();
    for tr in html::find_all(tbody, "tr", &Attrs::new()) {
        let td = html::find_tag(tr, "td", &Attrs::new())?;
        let anchor = html::find_tag(tr, "a", &Attrs::class("pep reference internal"))?;
        rows.push(IndexRow {
            cell: html::text(td),
            url: pep_url.join(html::attr(anchor, "href")?)?.to_string(),
        });
    }
    Ok(rows)
}

/// Walk the index and every PEP page. Any PEP page that cannot be loaded
/// aborts the whole walk.
pub fn collect_statuses(session: &dyn Session, config: &Config) -> Result<Option<PepSummary>> {
    let pep_url = config.site.pep_url()?;
    let Some(body) = get_response(session, pep_url.as_str()) else {
        return Ok(None);
    };
    let rows = index_rows(&body, config)?;

    let pb = progress::bar(rows.len(), "pep");
    let mut summary = PepSummary::default();
    for row in rows {
        pb.inc(1);
        let Some(page) = get_response(session, &row.url) else {
            pb.abandon();
            return Err(Error::ReportAborted { url: row.url });
        };

        let record = PepRecord {
            code: status_code(&row.cell),
            page_status: page_status(&page)?,
            table_cell: row.cell,
            url: row.url,
        };

        if let Some(finding) = record.reconcile(&config.pep.expected_status) {
            finding.log();
            summary.findings.push(finding);
        }
        summary.tally.record(&record.page_status);
    }
    pb.finish_and_clear();

    tracing::info!(
        peps = summary.tally.total(),
        findings = summary.findings.len(),
        "PEP statuses collected"
    );
    Ok(Some(summary))
}

pub fn pep(session: &dyn Session, config: &Config) -> Result<Option<ReportTable<StatusRow>>> {
    Ok(collect_statuses(session, config)?.map(|summary| ReportTable::new(summary.tally.into_rows())))
}
