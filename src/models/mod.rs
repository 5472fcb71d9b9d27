//! Domain models for decoded surveillance records

pub mod record;
pub mod types;

pub use record::{ComorbidityCodes, Dataset, RawRecord, Record};
pub use types::{AgeBand, Classification, Comorbidity, Outcome, PatientType, Sex};
