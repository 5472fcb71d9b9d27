//! Configuration for loading and reporting.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::error::util::safe_open_file;

/// Configuration for the whole pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Location of the patient-level table
    pub data_path: PathBuf,
    /// Field delimiter for delimited text input
    pub delimiter: u8,
    /// Rows per record batch when reading
    pub batch_size: usize,
    /// Number of rows scanned to infer the CSV schema
    pub schema_inference_rows: usize,
    /// Decoding rules for coded columns
    pub decoder: DecoderConfig,
    /// Sizes of the tabular report sections
    pub report: ReportConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("Covid Data.csv"),
            delimiter: b',',
            batch_size: 8192,
            schema_inference_rows: 1000,
            decoder: DecoderConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a configuration from a JSON file; absent keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path)?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    /// Replace the data path, keeping every other setting
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }
}

/// How the date-of-death column is interpreted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Placeholder written instead of a date for patients with no recorded death
    pub no_date_sentinel: String,
    /// `chrono` formats tried in order
    pub date_formats: Vec<String>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            no_date_sentinel: "9999-99-99".to_string(),
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%d/%m/%Y".to_string(),
                "%m/%d/%Y".to_string(),
            ],
        }
    }
}

/// Row limits for the tabular sections of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub preview_rows: usize,
    pub top_medical_units: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview_rows: 100,
            top_medical_units: 10,
        }
    }
}
