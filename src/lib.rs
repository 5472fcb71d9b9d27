//! Loading, decoding, filtering and summarising a patient-level COVID-19
//! surveillance table.
//!
//! The pipeline runs in three stages: a [`Decoder`] turns coded rows into typed
//! [`Record`]s, [`FilterParams`] narrow the decoded [`Dataset`] into a
//! [`FilteredView`], and the functions in [`stats`] summarise that view.

pub mod config;
pub mod decode;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod stats;
pub mod synth;
pub mod utils;

// Core types
pub use config::{DashboardConfig, DecoderConfig, ReportConfig};
pub use error::{DashboardError, Result};
pub use models::{Dataset, RawRecord, Record};

// Pipeline stages
pub use decode::{DecodeReport, Decoder};
pub use filter::{FilterParams, FilteredView, Selection, apply_filters, option_lists};
pub use loader::{DatasetCache, load_dataset};
pub use stats::DashboardSummary;

// Arrow types
pub use arrow::record_batch::RecordBatch;
