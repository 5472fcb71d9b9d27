//! Patient encounter records
//!
//! A [`RawRecord`] holds the coded values of one table row exactly as read; a
//! [`Record`] is the decoded form the filters and aggregations work on. A
//! [`Dataset`] owns the decoded rows and is never mutated after decoding.

use std::ops::Index;

use chrono::NaiveDate;

use crate::decode::DecodeReport;
use crate::models::types::{Classification, Comorbidity, PatientType, Sex, PRESENT_CODE};

/// One row of the source table before decoding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub sex: Option<i64>,
    pub patient_type: Option<i64>,
    pub classification: Option<i64>,
    pub age: Option<i64>,
    /// Date string or the no-date sentinel
    pub date_died: Option<String>,
    pub icu: Option<i64>,
    pub intubed: Option<i64>,
    pub medical_unit: Option<i64>,
    /// Indicator codes indexed by [`Comorbidity::index`]
    pub comorbidities: [Option<i64>; Comorbidity::COUNT],
}

/// Indicator codes for the tracked conditions of one patient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComorbidityCodes([Option<i32>; Comorbidity::COUNT]);

impl ComorbidityCodes {
    #[must_use]
    pub fn new(codes: [Option<i32>; Comorbidity::COUNT]) -> Self {
        Self(codes)
    }

    /// Raw indicator code for a condition
    #[must_use]
    pub fn code(&self, condition: Comorbidity) -> Option<i32> {
        self.0[condition.index()]
    }

    /// True only for the "present" code; absent, unknown and missing all count as absent
    #[must_use]
    pub fn has(&self, condition: Comorbidity) -> bool {
        self.code(condition) == Some(PRESENT_CODE)
    }

    /// Number of conditions coded as present
    #[must_use]
    pub fn count_present(&self) -> u8 {
        // At most Comorbidity::COUNT, so the cast cannot truncate
        Comorbidity::ALL.iter().filter(|c| self.has(**c)).count() as u8
    }
}

/// A decoded patient encounter
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub sex: Sex,
    pub patient_type: PatientType,
    pub classification: Classification,
    /// Age in years; `None` when the source value was missing
    pub age: Option<i32>,
    pub date_died: Option<NaiveDate>,
    /// Raw ICU code (1 yes, 2 no, 97 unknown)
    pub icu: Option<i32>,
    /// Raw intubation code (1 yes, 2 no, 97 unknown)
    pub intubed: Option<i32>,
    pub medical_unit: Option<i32>,
    pub comorbidities: ComorbidityCodes,
    /// Derived: a date of death is recorded
    pub mortality: bool,
    /// Derived: number of indicators coded as present, in 0..=10
    pub comorbidity_count: u8,
}

impl Record {
    /// Whether the patient has the given condition
    #[must_use]
    pub fn has(&self, condition: Comorbidity) -> bool {
        self.comorbidities.has(condition)
    }
}

/// The full decoded table
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    report: DecodeReport,
}

impl Dataset {
    /// Wrap decoded records together with the diagnostics gathered while decoding
    #[must_use]
    pub fn new(records: Vec<Record>, report: DecodeReport) -> Self {
        Self { records, report }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Diagnostics from decoding
    #[must_use]
    pub fn report(&self) -> &DecodeReport {
        &self.report
    }
}

impl Index<usize> for Dataset {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
