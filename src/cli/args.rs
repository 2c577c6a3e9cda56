//! CLI argument parsing

use crate::config::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Scrape release notes, versions, PEP statuses and archives from the Python docs
#[derive(Parser, Debug)]
#[command(name = "pydoc-scrape")]
#[command(about = "Scrape release notes, versions, PEP statuses and archives from the Python docs")]
#[command(version)]
pub struct Args {
    /// Report to build
    #[arg(value_enum)]
    pub mode: Mode,

    /// Clear the HTTP response cache before the run
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Output format (defaults to the config file, then console lines)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Which report to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Release-notes articles with title and authors
    WhatsNew,
    /// Documentation versions and their status
    LatestVersions,
    /// Save the A4 PDF documentation archive
    Download,
    /// PEP status counts, checked against each PEP page
    Pep,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}
