//! Fixtures shared by the integration tests
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use covid_dashboard::decode::columns;
use covid_dashboard::models::types::{ABSENT_CODE, Comorbidity, PRESENT_CODE, UNKNOWN_CODE};
use covid_dashboard::{Dataset, Decoder, RawRecord};

pub const NO_DATE: &str = "9999-99-99";

/// A coded row with sensible defaults: 40-year-old ambulatory male survivor, no
/// conditions, unknown ICU and intubation status
#[derive(Debug, Clone)]
pub struct PatientRow(RawRecord);

pub fn patient() -> PatientRow {
    PatientRow(RawRecord {
        sex: Some(1),
        patient_type: Some(1),
        classification: Some(3),
        age: Some(40),
        date_died: Some(NO_DATE.to_string()),
        icu: Some(i64::from(UNKNOWN_CODE)),
        intubed: Some(i64::from(UNKNOWN_CODE)),
        medical_unit: Some(4),
        comorbidities: [Some(i64::from(ABSENT_CODE)); Comorbidity::COUNT],
    })
}

impl PatientRow {
    pub fn sex(mut self, code: i64) -> Self {
        self.0.sex = Some(code);
        self
    }

    pub fn patient_type(mut self, code: i64) -> Self {
        self.0.patient_type = Some(code);
        self
    }

    pub fn classification(mut self, code: i64) -> Self {
        self.0.classification = Some(code);
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.0.age = Some(age);
        self
    }

    pub fn died(mut self, date: &str) -> Self {
        self.0.date_died = Some(date.to_string());
        self
    }

    pub fn no_death_date(mut self) -> Self {
        self.0.date_died = None;
        self
    }

    pub fn icu(mut self, code: i64) -> Self {
        self.0.icu = Some(code);
        self
    }

    pub fn intubed(mut self, code: i64) -> Self {
        self.0.intubed = Some(code);
        self
    }

    pub fn with(mut self, condition: Comorbidity) -> Self {
        self.0.comorbidities[condition.index()] = Some(i64::from(PRESENT_CODE));
        self
    }

    pub fn raw(self) -> RawRecord {
        self.0
    }
}

pub fn decode(rows: Vec<PatientRow>) -> Dataset {
    Decoder::default().decode(rows.into_iter().map(PatientRow::raw))
}

/// Unique path under the system temp directory
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("covid-dashboard-{}-{name}", std::process::id()))
}

fn int_value(raw: &RawRecord, column: &str) -> Option<i64> {
    match column {
        columns::SEX => raw.sex,
        columns::PATIENT_TYPE => raw.patient_type,
        columns::CLASSIFICATION => raw.classification,
        columns::AGE => raw.age,
        columns::ICU => raw.icu,
        columns::INTUBED => raw.intubed,
        columns::MEDICAL_UNIT => raw.medical_unit,
        "USMER" => Some(2),
        other => Comorbidity::ALL
            .iter()
            .find(|c| c.column() == other)
            .and_then(|c| raw.comorbidities[c.index()]),
    }
}

/// Write rows as a comma-separated file with the given header
pub fn write_csv_with_columns(name: &str, header: &[&str], rows: &[RawRecord]) -> PathBuf {
    let mut text = header.join(",");
    text.push('\n');
    for raw in rows {
        let cells: Vec<String> = header
            .iter()
            .map(|column| {
                if *column == columns::DATE_DIED {
                    raw.date_died.clone().unwrap_or_default()
                } else {
                    int_value(raw, column).map(|v| v.to_string()).unwrap_or_default()
                }
            })
            .collect();
        text.push_str(&cells.join(","));
        text.push('\n');
    }

    let path = temp_path(name);
    fs::write(&path, text).expect("write fixture CSV");
    path
}

/// Write rows as a CSV file with every required column plus an extra `USMER` column
pub fn write_csv(name: &str, rows: &[RawRecord]) -> PathBuf {
    let mut header = vec!["USMER"];
    header.extend(columns::required_columns());
    write_csv_with_columns(name, &header, rows)
}

/// Write rows as a Parquet file with every required column
pub fn write_parquet(name: &str, rows: &[RawRecord]) -> PathBuf {
    let names = columns::required_columns();
    let fields: Vec<Field> = names
        .iter()
        .map(|column| {
            let data_type = if *column == columns::DATE_DIED {
                DataType::Utf8
            } else {
                DataType::Int64
            };
            Field::new(*column, data_type, true)
        })
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let arrays: Vec<ArrayRef> = names
        .iter()
        .map(|column| -> ArrayRef {
            if *column == columns::DATE_DIED {
                Arc::new(StringArray::from(
                    rows.iter().map(|r| r.date_died.clone()).collect::<Vec<_>>(),
                ))
            } else {
                Arc::new(Int64Array::from(
                    rows.iter().map(|r| int_value(r, column)).collect::<Vec<_>>(),
                ))
            }
        })
        .collect();
    let batch = RecordBatch::try_new(Arc::clone(&schema), arrays).expect("build fixture batch");

    let path = temp_path(name);
    let file = fs::File::create(&path).expect("create fixture parquet");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("parquet writer");
    writer.write(&batch).expect("write batch");
    writer.close().expect("close parquet writer");
    path
}

/// A mixed set of rows covering every filter dimension
pub fn mixed_rows() -> Vec<PatientRow> {
    vec![
        patient().sex(1).age(34),
        patient().sex(2).age(71).patient_type(2).icu(1).intubed(1).died("2020-05-02"),
        patient().sex(1).age(58).patient_type(2).icu(2).with(Comorbidity::Diabetes),
        patient().sex(2).age(12),
        patient()
            .sex(1)
            .age(82)
            .patient_type(2)
            .icu(1)
            .intubed(2)
            .with(Comorbidity::Hypertension)
            .with(Comorbidity::Obesity)
            .died("2020-06-11"),
        patient().sex(97).age(45).classification(7),
        patient().sex(2).age(67).with(Comorbidity::Diabetes).with(Comorbidity::Hypertension),
        patient().sex(1).age(29).patient_type(2).icu(97).intubed(1).died("14/07/2020"),
        patient().sex(2).age(90).patient_type(2).with(Comorbidity::ChronicRenal).died("2021-01-20"),
        patient().sex(1).age(5),
    ]
}
