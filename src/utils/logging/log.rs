//! Logging utilities
//!
//! Messages for loading the surveillance table.

use std::path::Path;
use std::time::Duration;

use crate::decode::DecodeReport;

/// Log the start of loading a table
pub fn log_load_start(path: &Path) {
    log::info!("Loading surveillance data from {}", path.display());
}

/// One-line summary of a finished load
#[must_use]
pub fn load_summary(path: &Path, report: &DecodeReport, elapsed: Option<Duration>) -> String {
    let mut summary = format!("Loaded {} rows from {}", report.rows, path.display());
    if let Some(duration) = elapsed {
        summary.push_str(&format!(" in {duration:?}"));
    }
    match report.degraded_values() {
        0 => summary.push_str(", all codes mapped"),
        n => summary.push_str(&format!(", {n} values decoded as Unknown or missing")),
    }
    summary
}

/// Log the completion of a load with its decode diagnostics
pub fn log_load_complete(path: &Path, report: &DecodeReport, elapsed: Option<Duration>) {
    log::info!("{}", load_summary(path, report, elapsed));
}

/// Log a warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
