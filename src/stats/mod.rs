//! Aggregations over a filtered view
//!
//! Every function here is a pure function of a [`FilteredView`]: it reads the
//! records and returns a small table. Rates are percentages in `[0, 100]` and are
//! defined as 0 whenever the denominator is 0, so an empty view always yields empty
//! or zero-filled results.
//!
//! [`FilteredView`]: crate::filter::FilteredView

pub mod clinical;
pub mod demographics;
pub mod summary;

use std::collections::BTreeMap;
use std::hash::Hash;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

pub use clinical::{
    ConditionRisk, CriticalCareCounts, classification_distribution, comorbidity_mortality,
    critical_care_utilization, excess_risk,
};
pub use demographics::{
    OutcomeSummary, age_band_mortality, gender_distribution, gender_mortality, outcome_summary,
    patient_type_distribution,
};
pub use summary::{
    Coverage, DashboardSummary, KeyIndicators, PreviewRow, coverage, key_indicators,
    medical_unit_distribution, record_preview,
};

/// `part / whole * 100`, or 0 when `whole` is 0
#[must_use]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Deaths per 100 patients, or 0 for an empty group
#[must_use]
pub fn mortality_rate(deaths: usize, total: usize) -> f64 {
    percentage(deaths, total)
}

/// Deaths and totals for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MortalityGroup<K> {
    pub key: K,
    pub deaths: usize,
    pub total: usize,
    pub mortality_rate: f64,
}

/// Number of rows carrying one value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount<K> {
    pub key: K,
    pub count: usize,
}

/// Group `(key, died)` pairs, returning groups in ascending key order.
///
/// Only keys that occur appear in the output.
pub(crate) fn mortality_by<K, I>(items: I) -> Vec<MortalityGroup<K>>
where
    K: Ord,
    I: IntoIterator<Item = (K, bool)>,
{
    let mut groups: BTreeMap<K, (usize, usize)> = BTreeMap::new();
    for (key, died) in items {
        let (deaths, total) = groups.entry(key).or_default();
        *total += 1;
        if died {
            *deaths += 1;
        }
    }

    groups
        .into_iter()
        .map(|(key, (deaths, total))| MortalityGroup {
            key,
            deaths,
            total,
            mortality_rate: mortality_rate(deaths, total),
        })
        .collect()
}

/// Count occurrences of each key, most frequent first; ties keep key order
pub(crate) fn value_counts<K, I>(keys: I) -> Vec<CategoryCount<K>>
where
    K: Ord + Hash,
    I: IntoIterator<Item = K>,
{
    let mut counts: FxHashMap<K, usize> = FxHashMap::default();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(key, count)| CategoryCount { key, count })
        .sorted_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)))
        .collect()
}
