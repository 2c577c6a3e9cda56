//! Report extractors.
//!
//! Each extractor walks one part of the docs site and builds a
//! [`ReportTable`] of its own row type. `Ok(None)` means the entry page
//! could not be fetched (already logged); `Err` means the report was
//! aborted.

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;

pub use download::download;
pub use latest_versions::{latest_versions, VersionRow};
pub use pep::{pep, Finding, PepRecord, PepSummary, StatusRow, StatusTally};
pub use whats_new::{whats_new, WhatsNewRow};

use serde::Serialize;

/// A row shape with a fixed header
pub trait TableRow: Serialize {
    /// Column titles, in cell order
    const HEADER: &'static [&'static str];

    /// Cell values, same length as `HEADER`
    fn cells(&self) -> Vec<String>;
}

/// Header plus rows, built once per run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable<R> {
    rows: Vec<R>,
}

impl<R: TableRow> ReportTable<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn header(&self) -> Vec<String> {
        R::HEADER.iter().map(|h| h.to_string()).collect()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header row followed by every row's cells
    pub fn to_cells(&self) -> Vec<Vec<String>> {
        std::iter::once(self.header())
            .chain(self.rows.iter().map(TableRow::cells))
            .collect()
    }
}

impl<R> IntoIterator for ReportTable<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
