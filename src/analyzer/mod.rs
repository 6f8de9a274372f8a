//! Analyzer module for experiment log parsing.
//!
//! Provides functionality for:
//! - Reading experiment log files
//! - Extracting the per-epoch loss column into a `LossSeries`

pub mod log_loader;
pub mod log_parser;
pub mod types;

use anyhow::Context;
use std::path::Path;

pub use log_loader::LogLoader;
pub use log_parser::{ParseError, parse_loss_series};
pub use types::LossSeries;

/// Read a log file and extract its loss series.
///
/// The file handle is closed before the lines are parsed.
pub fn load_loss_series(path: &Path, label: impl Into<String>) -> anyhow::Result<LossSeries> {
    let lines = LogLoader::open(path)
        .and_then(LogLoader::read_lines)
        .with_context(|| format!("Failed to read log file: {}", path.display()))?;

    let values = parse_loss_series(&lines).with_context(|| format!("Invalid log file: {}", path.display()))?;

    let series = LossSeries::new(label, values);
    if series.is_empty() {
        log::warn!("{} contains no epochs", path.display());
    }
    log::info!("Loaded {} epochs from {}", series.len(), path.display());
    Ok(series)
}
