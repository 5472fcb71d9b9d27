//! Record filtering criteria
//!
//! Each criterion is one user-selectable restriction. Criteria are combined with a
//! logical AND across categories; within a multi-select category the selected
//! values are combined with OR (see [`Selection`]).

use crate::filter::params::{AgeRange, FilterCategory, FilterParams, Selection};
use crate::models::record::Record;
use crate::models::types::{Outcome, PatientType, Sex, is_known_status};

/// Defines a criterion for filtering entities
pub trait FilterCriteria<T> {
    /// Determine if an entity meets the filter criteria
    fn meets_criteria(&self, entity: &T) -> bool;
}

/// A restriction that can be applied to a decoded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    Gender(Selection<Sex>),
    PatientType(Selection<PatientType>),
    /// Inclusive age bounds
    AgeRange(AgeRange),
    /// Deceased keeps rows with a recorded death, Survived the others
    Outcome(Selection<Outcome>),
    /// Recorded ICU status of either polarity (code 1 or 2)
    IcuStatusKnown,
    MinComorbidities(u8),
    /// Combined filter that requires all criteria to be met
    All(Vec<RecordFilter>),
}

impl RecordFilter {
    /// Category this filter belongs to; `None` for combinations
    #[must_use]
    pub fn category(&self) -> Option<FilterCategory> {
        match self {
            Self::Gender(_) => Some(FilterCategory::Gender),
            Self::PatientType(_) => Some(FilterCategory::PatientType),
            Self::AgeRange(_) => Some(FilterCategory::AgeRange),
            Self::Outcome(_) => Some(FilterCategory::Outcome),
            Self::IcuStatusKnown => Some(FilterCategory::IcuOnly),
            Self::MinComorbidities(_) => Some(FilterCategory::MinComorbidities),
            Self::All(_) => None,
        }
    }
}

impl FilterCriteria<Record> for RecordFilter {
    fn meets_criteria(&self, record: &Record) -> bool {
        match self {
            Self::Gender(selection) => selection.allows(&record.sex),
            Self::PatientType(selection) => selection.allows(&record.patient_type),
            Self::AgeRange(range) => range.contains(record.age),
            Self::Outcome(selection) => selection.allows(&Outcome::from_mortality(record.mortality)),
            Self::IcuStatusKnown => is_known_status(record.icu),
            Self::MinComorbidities(min) => record.comorbidity_count >= *min,
            Self::All(filters) => filters.iter().all(|f| f.meets_criteria(record)),
        }
    }
}

impl FilterParams {
    /// The filters these parameters describe, in application order.
    ///
    /// Categories left at "no restriction" produce no filter, except the age range
    /// which always applies: a row without an age never passes it.
    #[must_use]
    pub fn to_filters(&self) -> Vec<RecordFilter> {
        let mut filters = Vec::with_capacity(FilterCategory::ORDER.len());

        if self.genders.is_restricted() {
            filters.push(RecordFilter::Gender(self.genders.clone()));
        }
        if self.patient_types.is_restricted() {
            filters.push(RecordFilter::PatientType(self.patient_types.clone()));
        }
        filters.push(RecordFilter::AgeRange(self.age_range));
        if self.outcomes.is_restricted() {
            filters.push(RecordFilter::Outcome(self.outcomes.clone()));
        }
        if self.icu_only {
            filters.push(RecordFilter::IcuStatusKnown);
        }
        if self.min_comorbidities > 0 {
            filters.push(RecordFilter::MinComorbidities(self.min_comorbidities));
        }

        filters
    }

    /// All filters combined into one predicate
    #[must_use]
    pub fn to_predicate(&self) -> RecordFilter {
        RecordFilter::All(self.to_filters())
    }
}
