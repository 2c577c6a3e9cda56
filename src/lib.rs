//! pydoc-scrape - Scrape structured reports from the Python documentation
//!
//! Builds four reports from docs.python.org and peps.python.org: What's New
//! articles, documentation versions, PEP status counts (checked against each
//! PEP page), and the A4 PDF archive download.

pub mod cli;
pub mod config;
pub mod error;
pub mod html;
pub mod logging;
pub mod net;
pub mod output;
pub mod progress;
pub mod reports;

// Re-export main types
pub use cli::Mode;
pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use net::{get_response, CachedSession, ResponseCache, Session};
pub use reports::{ReportTable, TableRow};
