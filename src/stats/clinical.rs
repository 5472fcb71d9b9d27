//! Clinical breakdowns: comorbidity burden, critical care, classification and
//! per-condition excess risk

use serde::Serialize;

use crate::filter::FilteredView;
use crate::models::types::{Classification, Comorbidity, is_known_status};
use crate::stats::{CategoryCount, MortalityGroup, mortality_by, mortality_rate, percentage, value_counts};

/// Mortality per comorbidity count, ascending by count; only counts that occur appear
#[must_use]
pub fn comorbidity_mortality(view: &FilteredView<'_>) -> Vec<MortalityGroup<u8>> {
    mortality_by(view.iter().map(|r| (r.comorbidity_count, r.mortality)))
}

/// Rows with a recorded ICU and intubation status.
///
/// Each count tests whether the code is 1 or 2, so a patient recorded as
/// "not admitted" is counted alongside one recorded as "admitted".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CriticalCareCounts {
    pub intubated: usize,
    pub icu: usize,
    pub both: usize,
}

#[must_use]
pub fn critical_care_utilization(view: &FilteredView<'_>) -> CriticalCareCounts {
    view.iter().fold(CriticalCareCounts::default(), |mut acc, r| {
        let intubed = is_known_status(r.intubed);
        let icu = is_known_status(r.icu);
        acc.intubated += usize::from(intubed);
        acc.icu += usize::from(icu);
        acc.both += usize::from(intubed && icu);
        acc
    })
}

/// Rows per final classification, including the `Unknown` bucket, most frequent first
#[must_use]
pub fn classification_distribution(view: &FilteredView<'_>) -> Vec<CategoryCount<Classification>> {
    value_counts(view.iter().map(|r| r.classification))
}

/// Mortality with and without one condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionRisk {
    pub condition: Comorbidity,
    /// Share of the view with the condition, in percent
    pub prevalence: f64,
    pub mortality_with: f64,
    pub mortality_without: f64,
    /// `mortality_with - mortality_without`, in percentage points
    pub excess_risk: f64,
    pub with_condition: usize,
    pub without_condition: usize,
}

/// Excess mortality for each condition, highest first.
///
/// A row has the condition only when its indicator is coded present; every other
/// code, unknown and missing included, counts as lacking it. Conditions for which
/// either side of the split is empty are left out.
#[must_use]
pub fn excess_risk(view: &FilteredView<'_>) -> Vec<ConditionRisk> {
    let mut with = [(0usize, 0usize); Comorbidity::COUNT];
    let mut without = [(0usize, 0usize); Comorbidity::COUNT];

    for record in view.iter() {
        for condition in Comorbidity::ALL {
            let split = if record.has(condition) { &mut with } else { &mut without };
            let (deaths, total) = &mut split[condition.index()];
            *total += 1;
            if record.mortality {
                *deaths += 1;
            }
        }
    }

    let mut risks: Vec<ConditionRisk> = Comorbidity::ALL
        .into_iter()
        .filter_map(|condition| {
            let (deaths_with, with_condition) = with[condition.index()];
            let (deaths_without, without_condition) = without[condition.index()];
            if with_condition == 0 || without_condition == 0 {
                return None;
            }

            let mortality_with = mortality_rate(deaths_with, with_condition);
            let mortality_without = mortality_rate(deaths_without, without_condition);
            Some(ConditionRisk {
                condition,
                prevalence: percentage(with_condition, view.len()),
                mortality_with,
                mortality_without,
                excess_risk: mortality_with - mortality_without,
                with_condition,
                without_condition,
            })
        })
        .collect();

    // Stable sort: equal risks keep column order
    risks.sort_by(|a, b| b.excess_risk.total_cmp(&a.excess_risk));
    risks
}
