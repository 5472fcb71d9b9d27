//! Loading the surveillance table
//!
//! The table is read into Arrow record batches (CSV through arrow-csv, Parquet
//! through the parquet Arrow reader), checked for every required column and only
//! then decoded. Any failure before decoding is fatal: no partial dataset is
//! returned.

use std::io::BufReader;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::DashboardConfig;
use crate::decode::{Decoder, columns};
use crate::error::util::safe_open_file;
use crate::error::{DashboardError, Result};
use crate::models::Dataset;
use crate::utils::logging::{log_load_complete, log_load_start};

/// Table formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Parquet,
}

impl InputFormat {
    /// Infer the format from the file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "parquet" | "pq" => Some(Self::Parquet),
            _ => None,
        }
    }
}

/// Read the table at `config.data_path` into record batches
pub fn read_batches(config: &DashboardConfig) -> Result<Vec<RecordBatch>> {
    let path = config.data_path.as_path();
    let format = InputFormat::from_path(path).ok_or_else(|| DashboardError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    match format {
        InputFormat::Csv => read_csv(path, config),
        InputFormat::Parquet => read_parquet(path, config.batch_size),
    }
}

/// Infer a CSV schema from the header and leading rows.
///
/// Every column the decoder reads is forced to text. Inference only sees the leading
/// rows, so a later value that does not fit the inferred type would fail the whole
/// read; as text it reaches the decoder, where the integer cast turns it into null.
/// `DATE_DIED` must stay text for the sentinel in any case.
pub fn infer_csv_schema(path: &Path, config: &DashboardConfig) -> Result<Schema> {
    let file = safe_open_file(path)?;
    let format = Format::default()
        .with_header(true)
        .with_delimiter(config.delimiter);
    let (inferred, _) = format.infer_schema(
        BufReader::new(file),
        Some(config.schema_inference_rows),
    )?;

    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|field| {
            if columns::is_required_column(field.name()) {
                Field::new(field.name(), DataType::Utf8, true)
            } else {
                field.as_ref().clone().with_nullable(true)
            }
        })
        .collect();

    Ok(Schema::new(fields))
}

fn read_csv(path: &Path, config: &DashboardConfig) -> Result<Vec<RecordBatch>> {
    let schema = infer_csv_schema(path, config)?;
    validate_columns(&schema, path)?;

    let file = safe_open_file(path)?;
    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_header(true)
        .with_delimiter(config.delimiter)
        .with_batch_size(config.batch_size)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(batches)
}

fn read_parquet(path: &Path, batch_size: usize) -> Result<Vec<RecordBatch>> {
    let file = safe_open_file(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    validate_columns(builder.schema(), path)?;

    let reader = builder.with_batch_size(batch_size).build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(batches)
}

/// Check that every column the decoder reads is present in `schema`
pub fn validate_columns(schema: &Schema, path: &Path) -> Result<()> {
    for column in columns::required_columns() {
        if schema.index_of(column).is_err() {
            return Err(DashboardError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Read, validate and decode the configured table
pub fn load_dataset(config: &DashboardConfig) -> Result<Dataset> {
    let path = config.data_path.as_path();
    log_load_start(path);
    let start = Instant::now();

    let batches = read_batches(config)?;
    debug!("Read {} record batches from {}", batches.len(), path.display());

    let dataset = Decoder::new(config.decoder.clone()).decode_batches(&batches)?;
    log_load_complete(path, dataset.report(), Some(start.elapsed()));
    Ok(dataset)
}

/// A load-once handle to the decoded dataset.
///
/// The first successful [`DatasetCache::get`] reads and decodes the table; later
/// calls share the same immutable dataset. A failed load is not cached, so a
/// corrected file can be picked up by calling `get` again.
#[derive(Debug)]
pub struct DatasetCache {
    config: DashboardConfig,
    dataset: OnceLock<Arc<Dataset>>,
}

impl DatasetCache {
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: OnceLock::new(),
        }
    }

    /// Wrap an already decoded dataset
    #[must_use]
    pub fn preloaded(config: DashboardConfig, dataset: Dataset) -> Self {
        let cache = Self::new(config);
        // A fresh cell is always empty, so this cannot fail
        let _ = cache.dataset.set(Arc::new(dataset));
        cache
    }

    /// The dataset, loading it on first access
    pub fn get(&self) -> Result<Arc<Dataset>> {
        if let Some(dataset) = self.dataset.get() {
            return Ok(Arc::clone(dataset));
        }

        let loaded = Arc::new(load_dataset(&self.config)?);
        // If another caller finished first, keep theirs so every reader shares one dataset
        Ok(Arc::clone(self.dataset.get_or_init(|| loaded)))
    }

    /// Whether the dataset has been loaded
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.dataset.get().is_some()
    }

    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.config.data_path
    }
}
