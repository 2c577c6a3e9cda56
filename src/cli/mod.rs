//! CLI module for pydoc-scrape

mod args;

pub use args::{Args, Mode};

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::Result;
use crate::logging;
use crate::net::{CachedSession, ResponseCache, Session};
use crate::output::control_output;
use crate::reports::{self, ReportTable, TableRow};
use std::path::Path;
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Parser stopped");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    // An explicit config must load; the default one is optional
    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    };
    cfg.merge_cli(args.output);

    logging::init(&cfg.paths.logs(), args.verbose)?;
    tracing::info!("Parser started");
    tracing::info!(?args, "Command line arguments");

    let session = CachedSession::new(&cfg.http, ResponseCache::new(cfg.paths.cache()))?;
    if args.clear_cache {
        session.clear_cache()?;
    }

    run_mode(args.mode, &session, &cfg)?;

    tracing::info!("Parser finished");
    Ok(())
}

/// Build the report for `mode` and hand it to the reporter
pub fn run_mode(mode: Mode, session: &dyn Session, cfg: &Config) -> Result<()> {
    match mode {
        Mode::WhatsNew => report(reports::whats_new(session, cfg)?, mode, cfg),
        Mode::LatestVersions => report(reports::latest_versions(session, cfg)?, mode, cfg),
        Mode::Pep => report(reports::pep(session, cfg)?, mode, cfg),
        Mode::Download => {
            if let Some(path) = reports::download(session, cfg)? {
                println!("Archive saved to: {}", path.display());
            }
            Ok(())
        }
    }
}

fn report<R: TableRow>(table: Option<ReportTable<R>>, mode: Mode, cfg: &Config) -> Result<()> {
    let Some(table) = table else {
        tracing::warn!(mode = mode.as_str(), "No results to report");
        return Ok(());
    };

    if let Some(path) = control_output(&table, mode.as_str(), cfg)? {
        println!("Results written to: {}", path.display());
    }
    Ok(())
}
