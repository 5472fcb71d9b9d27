//! Source column names and typed column extraction from record batches

use arrow::array::{Array, Int64Array, StringArray};
use arrow::compute::kernels::cast::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{DashboardError, Result};
use crate::models::types::Comorbidity;

pub const SEX: &str = "SEX";
pub const PATIENT_TYPE: &str = "PATIENT_TYPE";
/// Spelled as in the published dataset
pub const CLASSIFICATION: &str = "CLASIFFICATION_FINAL";
pub const AGE: &str = "AGE";
pub const DATE_DIED: &str = "DATE_DIED";
pub const ICU: &str = "ICU";
pub const INTUBED: &str = "INTUBED";
pub const MEDICAL_UNIT: &str = "MEDICAL_UNIT";

/// Every column the decoder reads
#[must_use]
pub fn required_columns() -> Vec<&'static str> {
    let mut columns = vec![
        SEX,
        PATIENT_TYPE,
        CLASSIFICATION,
        AGE,
        DATE_DIED,
        ICU,
        INTUBED,
        MEDICAL_UNIT,
    ];
    columns.extend(Comorbidity::ALL.iter().map(|c| c.column()));
    columns
}

/// Whether the decoder reads `name`
#[must_use]
pub fn is_required_column(name: &str) -> bool {
    required_columns().contains(&name)
}

fn column_by_name<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a arrow::array::ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DashboardError::InvalidColumn {
            column: name.to_string(),
            reason: "not present in record batch".to_string(),
        })?;
    Ok(batch.column(idx))
}

/// Read a coded column as 64-bit integers.
///
/// Values that cannot be represented become null rather than failing the batch.
pub fn int_column(batch: &RecordBatch, name: &str) -> Result<Int64Array> {
    let column = column_by_name(batch, name)?;
    let converted = if column.data_type() == &DataType::Int64 {
        column.clone()
    } else {
        debug!(
            "Converting column '{name}' from {:?} to Int64",
            column.data_type()
        );
        cast(column, &DataType::Int64)?
    };

    converted
        .as_any()
        .downcast_ref::<Int64Array>()
        .cloned()
        .ok_or_else(|| DashboardError::InvalidColumn {
            column: name.to_string(),
            reason: format!("expected Int64 after conversion, found {:?}", converted.data_type()),
        })
}

/// Read a column as UTF-8 text, converting dates and numbers to their string form
pub fn text_column(batch: &RecordBatch, name: &str) -> Result<StringArray> {
    let column = column_by_name(batch, name)?;
    let converted = if column.data_type() == &DataType::Utf8 {
        column.clone()
    } else {
        cast(column, &DataType::Utf8)?
    };

    converted
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| DashboardError::InvalidColumn {
            column: name.to_string(),
            reason: format!("expected Utf8 after conversion, found {:?}", converted.data_type()),
        })
}

/// Value at `row`, or `None` for null slots
#[must_use]
pub fn int_at(array: &Int64Array, row: usize) -> Option<i64> {
    (!array.is_null(row)).then(|| array.value(row))
}

/// Text at `row`, or `None` for null slots
#[must_use]
pub fn text_at(array: &StringArray, row: usize) -> Option<&str> {
    (!array.is_null(row)).then(|| array.value(row))
}
