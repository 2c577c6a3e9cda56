// Report rendering: console, pretty table, and result files

pub mod csv;
pub mod html;
pub mod table;

pub use html::ReportRenderer;

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::reports::{ReportTable, TableRow};
use chrono::Local;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// `<results_dir>/<mode>_<timestamp>.<ext>`
pub fn result_path(results_dir: &Path, mode: &str, timestamp: &str, ext: &str) -> PathBuf {
    results_dir.join(format!("{}_{}.{}", mode, timestamp, ext))
}

/// Render `report` in the configured format. Returns the file written, if any.
pub fn control_output<R: TableRow>(
    report: &ReportTable<R>,
    mode: &str,
    config: &Config,
) -> Result<Option<PathBuf>> {
    let cells = report.to_cells();
    match config.output.format {
        OutputFormat::Console => {
            table::write_plain(io::stdout().lock(), &cells)?;
            Ok(None)
        }
        OutputFormat::Pretty => {
            table::write_pretty(io::stdout().lock(), &cells)?;
            Ok(None)
        }
        format => file_output(report, &cells, mode, format, &config.paths.results()).map(Some),
    }
}

fn file_output<R: TableRow>(
    report: &ReportTable<R>,
    cells: &[Vec<String>],
    mode: &str,
    format: OutputFormat,
    results_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(results_dir)?;
    let now = Local::now();
    let timestamp = now.format(DATETIME_FORMAT).to_string();

    let path = match format {
        OutputFormat::Json => {
            let path = result_path(results_dir, mode, &timestamp, "json");
            let mut w = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut w, report.rows())?;
            w.flush()?;
            path
        }
        OutputFormat::Html => {
            let path = result_path(results_dir, mode, &timestamp, "html");
            let generated_at = now.format("%Y-%m-%d %H:%M:%S").to_string();
            let page = ReportRenderer::new()?.render(mode, cells, &generated_at)?;
            fs::write(&path, page)?;
            path
        }
        _ => {
            let path = result_path(results_dir, mode, &timestamp, "csv");
            csv::write_rows(BufWriter::new(File::create(&path)?), cells)?;
            path
        }
    };

    tracing::info!(path = %path.display(), "Results file saved");
    Ok(path)
}
