//! Demographic breakdowns: age bands, sex, patient type and outcome

use serde::Serialize;

use crate::filter::FilteredView;
use crate::models::types::{AgeBand, Outcome, PatientType, Sex};
use crate::stats::{CategoryCount, MortalityGroup, mortality_by, value_counts};

/// Mortality per fixed age band.
///
/// Bands without members are omitted. Rows whose age is missing or outside
/// [0, 130] belong to no band and are left out.
#[must_use]
pub fn age_band_mortality(view: &FilteredView<'_>) -> Vec<MortalityGroup<AgeBand>> {
    mortality_by(
        view.iter()
            .filter_map(|r| r.age.and_then(AgeBand::from_age).map(|band| (band, r.mortality))),
    )
}

/// Mortality per sex, in the order Male, Female, Unknown
#[must_use]
pub fn gender_mortality(view: &FilteredView<'_>) -> Vec<MortalityGroup<Sex>> {
    mortality_by(view.iter().map(|r| (r.sex, r.mortality)))
}

/// Rows per sex, most frequent first
#[must_use]
pub fn gender_distribution(view: &FilteredView<'_>) -> Vec<CategoryCount<Sex>> {
    value_counts(view.iter().map(|r| r.sex))
}

/// Rows per patient type, most frequent first
#[must_use]
pub fn patient_type_distribution(view: &FilteredView<'_>) -> Vec<CategoryCount<PatientType>> {
    value_counts(view.iter().map(|r| r.patient_type))
}

/// Survivors and deaths in the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeSummary {
    pub survived: usize,
    pub deceased: usize,
}

impl OutcomeSummary {
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Survived => self.survived,
            Outcome::Deceased => self.deceased,
        }
    }
}

#[must_use]
pub fn outcome_summary(view: &FilteredView<'_>) -> OutcomeSummary {
    let deceased = view.iter().filter(|r| r.mortality).count();
    OutcomeSummary {
        survived: view.len() - deceased,
        deceased,
    }
}
