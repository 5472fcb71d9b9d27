//! Decoding of coded surveillance rows
//!
//! The decoder is total: every row yields a [`Record`] with a mortality flag and a
//! comorbidity count. Codes outside the known mappings, missing values and
//! unparsable dates degrade to `Unknown` or "no date" and are tallied in a
//! [`DecodeReport`] so they are visible without ever failing the load.

pub mod columns;

use std::ops::AddAssign;

use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use log::{debug, warn};
use rayon::prelude::*;

use crate::config::DecoderConfig;
use crate::error::Result;
use crate::models::record::{ComorbidityCodes, Dataset, RawRecord, Record};
use crate::models::types::{Classification, Comorbidity, PatientType, Sex};

/// Counts of values that were degraded while decoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Rows decoded
    pub rows: usize,
    /// Sex codes outside {1, 2, 97}, including missing values
    pub unmapped_sex: usize,
    /// Patient type codes outside {1, 2, 97}, including missing values
    pub unmapped_patient_type: usize,
    /// Classification codes outside 1..=7, including missing values
    pub unmapped_classification: usize,
    /// Death dates that were neither a date nor the sentinel
    pub unparsed_dates: usize,
    /// Rows without a usable age
    pub missing_age: usize,
}

impl DecodeReport {
    /// Whether any value had to be degraded
    #[must_use]
    pub fn has_issues(&self) -> bool {
        self.unmapped_sex > 0
            || self.unmapped_patient_type > 0
            || self.unmapped_classification > 0
            || self.unparsed_dates > 0
            || self.missing_age > 0
    }

    /// Total number of degraded values across all kinds
    #[must_use]
    pub fn degraded_values(&self) -> usize {
        self.unmapped_sex
            + self.unmapped_patient_type
            + self.unmapped_classification
            + self.unparsed_dates
            + self.missing_age
    }

    /// Emit one warning per kind of degraded value
    pub fn log_issues(&self) {
        if self.unmapped_sex > 0 {
            warn!("{} rows had an unmapped SEX code and were decoded as Unknown", self.unmapped_sex);
        }
        if self.unmapped_patient_type > 0 {
            warn!(
                "{} rows had an unmapped PATIENT_TYPE code and were decoded as Unknown",
                self.unmapped_patient_type
            );
        }
        if self.unmapped_classification > 0 {
            warn!(
                "{} rows had an unmapped classification code and were decoded as Unknown",
                self.unmapped_classification
            );
        }
        if self.unparsed_dates > 0 {
            warn!(
                "{} DATE_DIED values could not be parsed and were treated as no date",
                self.unparsed_dates
            );
        }
        if self.missing_age > 0 {
            warn!("{} rows have no usable AGE", self.missing_age);
        }
    }
}

impl AddAssign for DecodeReport {
    fn add_assign(&mut self, other: Self) {
        self.rows += other.rows;
        self.unmapped_sex += other.unmapped_sex;
        self.unmapped_patient_type += other.unmapped_patient_type;
        self.unmapped_classification += other.unmapped_classification;
        self.unparsed_dates += other.unparsed_dates;
        self.missing_age += other.missing_age;
    }
}

/// Outcome of interpreting one `DATE_DIED` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathDate {
    Date(NaiveDate),
    /// Empty, missing or the sentinel
    NotRecorded,
    /// Text that matched no configured format
    Unparsed,
}

impl DeathDate {
    #[must_use]
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(date),
            Self::NotRecorded | Self::Unparsed => None,
        }
    }
}

/// Converts coded rows into [`Record`]s
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Interpret a `DATE_DIED` value
    #[must_use]
    pub fn parse_death_date(&self, raw: Option<&str>) -> DeathDate {
        let Some(text) = raw.map(str::trim) else {
            return DeathDate::NotRecorded;
        };
        if text.is_empty() || text == self.config.no_date_sentinel {
            return DeathDate::NotRecorded;
        }

        self.config
            .date_formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
            .map_or(DeathDate::Unparsed, DeathDate::Date)
    }

    /// Decode one row, recording any degraded value in `report`
    pub fn decode_row(&self, raw: &RawRecord, report: &mut DecodeReport) -> Record {
        report.rows += 1;

        let sex = map_code(raw.sex, Sex::from_code).unwrap_or_else(|| {
            report.unmapped_sex += 1;
            Sex::Unknown
        });
        let patient_type = map_code(raw.patient_type, PatientType::from_code).unwrap_or_else(|| {
            report.unmapped_patient_type += 1;
            PatientType::Unknown
        });
        let classification =
            map_code(raw.classification, Classification::from_code).unwrap_or_else(|| {
                report.unmapped_classification += 1;
                Classification::Unknown
            });

        let age = narrow(raw.age);
        if age.is_none() {
            report.missing_age += 1;
        }

        let date_died = match self.parse_death_date(raw.date_died.as_deref()) {
            DeathDate::Unparsed => {
                report.unparsed_dates += 1;
                None
            }
            parsed => parsed.date(),
        };

        let comorbidities = ComorbidityCodes::new(raw.comorbidities.map(narrow));

        Record {
            sex,
            patient_type,
            classification,
            age,
            date_died,
            icu: narrow(raw.icu),
            intubed: narrow(raw.intubed),
            medical_unit: narrow(raw.medical_unit),
            comorbidities,
            mortality: date_died.is_some(),
            comorbidity_count: comorbidities.count_present(),
        }
    }

    /// Decode a sequence of raw rows into a dataset, preserving row order
    pub fn decode<I>(&self, rows: I) -> Dataset
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut report = DecodeReport::default();
        let records = rows
            .into_iter()
            .map(|raw| self.decode_row(&raw, &mut report))
            .collect();
        report.log_issues();
        Dataset::new(records, report)
    }

    /// Decode every row of one record batch
    pub fn decode_batch(&self, batch: &RecordBatch) -> Result<(Vec<Record>, DecodeReport)> {
        let sex = columns::int_column(batch, columns::SEX)?;
        let patient_type = columns::int_column(batch, columns::PATIENT_TYPE)?;
        let classification = columns::int_column(batch, columns::CLASSIFICATION)?;
        let age = columns::int_column(batch, columns::AGE)?;
        let date_died = columns::text_column(batch, columns::DATE_DIED)?;
        let icu = columns::int_column(batch, columns::ICU)?;
        let intubed = columns::int_column(batch, columns::INTUBED)?;
        let medical_unit = columns::int_column(batch, columns::MEDICAL_UNIT)?;
        let indicators = Comorbidity::ALL
            .iter()
            .map(|c| columns::int_column(batch, c.column()))
            .collect::<Result<Vec<_>>>()?;

        let mut report = DecodeReport::default();
        let records = (0..batch.num_rows())
            .map(|row| {
                let raw = RawRecord {
                    sex: columns::int_at(&sex, row),
                    patient_type: columns::int_at(&patient_type, row),
                    classification: columns::int_at(&classification, row),
                    age: columns::int_at(&age, row),
                    date_died: columns::text_at(&date_died, row).map(str::to_string),
                    icu: columns::int_at(&icu, row),
                    intubed: columns::int_at(&intubed, row),
                    medical_unit: columns::int_at(&medical_unit, row),
                    comorbidities: std::array::from_fn(|i| columns::int_at(&indicators[i], row)),
                };
                self.decode_row(&raw, &mut report)
            })
            .collect();

        Ok((records, report))
    }

    /// Decode a sequence of batches into one dataset.
    ///
    /// Batches are decoded in parallel; rows keep the order of the input batches.
    pub fn decode_batches(&self, batches: &[RecordBatch]) -> Result<Dataset> {
        let decoded = batches
            .par_iter()
            .map(|batch| self.decode_batch(batch))
            .collect::<Result<Vec<_>>>()?;

        let mut report = DecodeReport::default();
        let mut records = Vec::with_capacity(decoded.iter().map(|(r, _)| r.len()).sum());
        for (batch_records, batch_report) in decoded {
            records.extend(batch_records);
            report += batch_report;
        }

        debug!("Decoded {} rows from {} batches", report.rows, batches.len());
        report.log_issues();
        Ok(Dataset::new(records, report))
    }
}

fn map_code<T>(code: Option<i64>, from_code: fn(i32) -> Option<T>) -> Option<T> {
    narrow(code).and_then(from_code)
}

fn narrow(code: Option<i64>) -> Option<i32> {
    code.and_then(|c| i32::try_from(c).ok())
}
