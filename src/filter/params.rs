//! Filter parameters supplied by the presentation layer

use std::collections::BTreeSet;

use crate::models::types::{AgeBand, Outcome, PatientType, Sex};

/// A multi-select choice over a category.
///
/// `All` and an empty `Only` set both mean "no restriction"; a non-empty set keeps
/// rows whose value is any of the selected values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T: Ord> {
    All,
    Only(BTreeSet<T>),
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: Ord> Selection<T> {
    /// Select exactly the given values
    pub fn only<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self::Only(values.into_iter().collect())
    }

    /// Whether this selection excludes anything
    #[must_use]
    pub fn is_restricted(&self) -> bool {
        matches!(self, Self::Only(values) if !values.is_empty())
    }

    /// Whether `value` passes the selection
    #[must_use]
    pub fn allows(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(values) => values.is_empty() || values.contains(value),
        }
    }
}

impl<T: Ord> FromIterator<T> for Selection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::only(iter)
    }
}

/// Inclusive age bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: i32,
    pub max: i32,
}

impl AgeRange {
    #[must_use]
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Whether a known age lies within the bounds; a missing age never does
    #[must_use]
    pub fn contains(&self, age: Option<i32>) -> bool {
        age.is_some_and(|a| self.min <= a && a <= self.max)
    }
}

impl Default for AgeRange {
    /// The full slider range, 0 to 130
    fn default() -> Self {
        Self::new(AgeBand::MIN_AGE, AgeBand::MAX_AGE)
    }
}

/// Filter categories, in the order they are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterCategory {
    Gender,
    PatientType,
    AgeRange,
    Outcome,
    IcuOnly,
    MinComorbidities,
}

impl FilterCategory {
    /// Application order
    pub const ORDER: [Self; 6] = [
        Self::Gender,
        Self::PatientType,
        Self::AgeRange,
        Self::Outcome,
        Self::IcuOnly,
        Self::MinComorbidities,
    ];
}

/// The complete set of filter choices for one view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterParams {
    pub genders: Selection<Sex>,
    pub patient_types: Selection<PatientType>,
    pub age_range: AgeRange,
    pub outcomes: Selection<Outcome>,
    /// Keep only rows with a recorded ICU status (of either polarity)
    pub icu_only: bool,
    pub min_comorbidities: u8,
}

impl FilterParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_genders(mut self, genders: Selection<Sex>) -> Self {
        self.genders = genders;
        self
    }

    #[must_use]
    pub fn with_patient_types(mut self, patient_types: Selection<PatientType>) -> Self {
        self.patient_types = patient_types;
        self
    }

    #[must_use]
    pub fn with_age_range(mut self, min: i32, max: i32) -> Self {
        self.age_range = AgeRange::new(min, max);
        self
    }

    #[must_use]
    pub fn with_outcomes(mut self, outcomes: Selection<Outcome>) -> Self {
        self.outcomes = outcomes;
        self
    }

    #[must_use]
    pub fn with_icu_only(mut self, icu_only: bool) -> Self {
        self.icu_only = icu_only;
        self
    }

    #[must_use]
    pub fn with_min_comorbidities(mut self, min: u8) -> Self {
        self.min_comorbidities = min;
        self
    }
}
