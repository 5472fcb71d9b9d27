//! Builders for coded rows used across unit tests

use crate::decode::Decoder;
use crate::models::types::{ABSENT_CODE, Comorbidity, PRESENT_CODE, UNKNOWN_CODE};
use crate::models::{Dataset, RawRecord};

/// Builder for one coded row; defaults describe a 40-year-old ambulatory male
/// survivor with no conditions and unknown ICU/intubation status
#[derive(Debug, Clone)]
pub struct RowBuilder {
    raw: RawRecord,
}

pub fn row() -> RowBuilder {
    RowBuilder {
        raw: RawRecord {
            sex: Some(1),
            patient_type: Some(1),
            classification: Some(3),
            age: Some(40),
            date_died: Some("9999-99-99".to_string()),
            icu: Some(i64::from(UNKNOWN_CODE)),
            intubed: Some(i64::from(UNKNOWN_CODE)),
            medical_unit: Some(4),
            comorbidities: [Some(i64::from(ABSENT_CODE)); Comorbidity::COUNT],
        },
    }
}

impl RowBuilder {
    pub fn sex(mut self, code: i64) -> Self {
        self.raw.sex = Some(code);
        self
    }

    pub fn patient_type(mut self, code: i64) -> Self {
        self.raw.patient_type = Some(code);
        self
    }

    pub fn classification(mut self, code: i64) -> Self {
        self.raw.classification = Some(code);
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.raw.age = Some(age);
        self
    }

    pub fn no_age(mut self) -> Self {
        self.raw.age = None;
        self
    }

    pub fn died(mut self, date: &str) -> Self {
        self.raw.date_died = Some(date.to_string());
        self
    }

    pub fn icu(mut self, code: i64) -> Self {
        self.raw.icu = Some(code);
        self
    }

    pub fn intubed(mut self, code: i64) -> Self {
        self.raw.intubed = Some(code);
        self
    }

    pub fn unit(mut self, unit: i64) -> Self {
        self.raw.medical_unit = Some(unit);
        self
    }

    pub fn with(mut self, condition: Comorbidity) -> Self {
        self.raw.comorbidities[condition.index()] = Some(i64::from(PRESENT_CODE));
        self
    }

    pub fn build(self) -> RawRecord {
        self.raw
    }
}

/// Decode built rows with the default decoder
pub fn dataset(rows: Vec<RowBuilder>) -> Dataset {
    Decoder::default().decode(rows.into_iter().map(RowBuilder::build))
}
