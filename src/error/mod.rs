//! Error handling for the dashboard pipeline.

pub mod util;

use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Specialized error type for loading, decoding and configuring the pipeline
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The input file does not exist
    #[error("input file not found: {path:?}")]
    FileNotFound { path: PathBuf },

    /// The input file exists but could not be opened or read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported table format
    #[error("unsupported input format {path:?} (expected .csv or .parquet)")]
    UnsupportedFormat { path: PathBuf },

    /// A column required by the decoder is absent from the table
    #[error("required column {column} missing from {path:?}")]
    MissingColumn { column: String, path: PathBuf },

    /// A column is present but its values cannot be interpreted
    #[error("column {column} cannot be decoded: {reason}")]
    InvalidColumn { column: String, reason: String },

    /// A label supplied by a caller does not name a known category
    #[error("unknown {kind} label {value:?}")]
    InvalidLabel { kind: &'static str, value: String },

    #[error(transparent)]
    Arrow(#[from] ArrowError),

    #[error(transparent)]
    Parquet(#[from] ParquetError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    /// Whether this error was raised while locating or reading the input table
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::Io { .. }
                | Self::UnsupportedFormat { .. }
                | Self::MissingColumn { .. }
                | Self::Arrow(_)
                | Self::Parquet(_)
        )
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, DashboardError>;
