//! Choices offered for the multi-select filters
//!
//! The choices for a category depend on the filters applied before it: once a
//! gender is selected, only the patient types present among those patients are
//! offered. Options are recomputed from the dataset on each call.

use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::filter::core::apply_record_filters;
use crate::filter::params::{FilterCategory, FilterParams};
use crate::models::record::Dataset;
use crate::models::types::{Outcome, PatientType, Sex};

/// Label for the "no restriction" choice shown ahead of the options
pub const ALL_LABEL: &str = "All";

/// Multi-select categories with selectable labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionCategory {
    Gender,
    PatientType,
    Outcome,
}

impl OptionCategory {
    #[must_use]
    pub fn filter_category(self) -> FilterCategory {
        match self {
            Self::Gender => FilterCategory::Gender,
            Self::PatientType => FilterCategory::PatientType,
            Self::Outcome => FilterCategory::Outcome,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Gender => "Gender",
            Self::PatientType => "Patient Type",
            Self::Outcome => "Outcome",
        }
    }
}

/// Labels available for `category` given the filters applied upstream of it.
///
/// Gender choices come from the whole dataset and patient types from the rows the
/// gender filter leaves. Outcome choices are fixed. Labels follow the category's
/// declaration order (Survived before Deceased) and do not include [`ALL_LABEL`].
#[must_use]
pub fn available_options(
    dataset: &Dataset,
    category: OptionCategory,
    params: &FilterParams,
) -> Vec<&'static str> {
    let target = category.filter_category();
    let upstream: Vec<_> = params
        .to_filters()
        .into_iter()
        .filter(|f| f.category().is_some_and(|c| c < target))
        .collect();

    match category {
        OptionCategory::Outcome => Outcome::ALL.iter().map(|o| o.label()).collect(),
        OptionCategory::Gender => present_labels(
            Sex::ALL,
            apply_record_filters(dataset, &upstream).iter().map(|r| r.sex),
            Sex::label,
        ),
        OptionCategory::PatientType => present_labels(
            PatientType::ALL,
            apply_record_filters(dataset, &upstream)
                .iter()
                .map(|r| r.patient_type),
            PatientType::label,
        ),
    }
}

/// Labels of the variants in `all` that occur in `present`, in the order of `all`
fn present_labels<T, I>(all: &[T], present: I, label: fn(T) -> &'static str) -> Vec<&'static str>
where
    T: Copy + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let seen: FxHashSet<T> = present.into_iter().collect();
    all.iter()
        .copied()
        .filter(|v| seen.contains(v))
        .map(label)
        .collect()
}

/// Options for every category, each prefixed with [`ALL_LABEL`]
#[must_use]
pub fn option_lists(dataset: &Dataset, params: &FilterParams) -> Vec<(OptionCategory, Vec<&'static str>)> {
    [OptionCategory::Gender, OptionCategory::PatientType, OptionCategory::Outcome]
        .into_iter()
        .map(|category| {
            let mut labels = vec![ALL_LABEL];
            labels.extend(available_options(dataset, category, params));
            (category, labels)
        })
        .collect()
}
