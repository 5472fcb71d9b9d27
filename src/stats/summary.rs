//! Headline indicators, coverage and the bundled dashboard summary

use serde::Serialize;

use crate::config::ReportConfig;
use crate::filter::FilteredView;
use crate::models::types::{AgeBand, Classification, Comorbidity, PatientType, Sex};
use crate::stats::clinical::{
    ConditionRisk, CriticalCareCounts, classification_distribution, comorbidity_mortality,
    critical_care_utilization, excess_risk,
};
use crate::stats::demographics::{
    OutcomeSummary, age_band_mortality, gender_distribution, gender_mortality, outcome_summary,
    patient_type_distribution,
};
use crate::stats::{CategoryCount, MortalityGroup, mortality_rate, percentage, value_counts};

/// Headline numbers for the selected population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyIndicators {
    pub total_cases: usize,
    pub deaths: usize,
    pub mortality_rate: f64,
    /// Mean over rows with a recorded age; `None` when no row has one
    pub average_age: Option<f64>,
    /// Share of hospitalized patients, in percent
    pub hospitalization_rate: f64,
}

#[must_use]
pub fn key_indicators(view: &FilteredView<'_>) -> KeyIndicators {
    let total_cases = view.len();
    let deaths = view.iter().filter(|r| r.mortality).count();
    let hospitalized = view
        .iter()
        .filter(|r| r.patient_type == PatientType::Hospitalized)
        .count();

    let (age_sum, aged) = view
        .iter()
        .filter_map(|r| r.age)
        .fold((0i64, 0usize), |(sum, n), age| (sum + i64::from(age), n + 1));
    let average_age = (aged > 0).then(|| age_sum as f64 / aged as f64);

    KeyIndicators {
        total_cases,
        deaths,
        mortality_rate: mortality_rate(deaths, total_cases),
        average_age,
        hospitalization_rate: percentage(hospitalized, total_cases),
    }
}

/// How much of the dataset the current filters keep
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coverage {
    pub selected: usize,
    pub total: usize,
    pub percent: f64,
}

#[must_use]
pub fn coverage(view: &FilteredView<'_>) -> Coverage {
    let selected = view.len();
    let total = view.dataset_len();
    Coverage {
        selected,
        total,
        percent: percentage(selected, total),
    }
}

/// The `top_n` most frequent medical units; rows without a unit are not counted
#[must_use]
pub fn medical_unit_distribution(view: &FilteredView<'_>, top_n: usize) -> Vec<CategoryCount<i32>> {
    let mut counts = value_counts(view.iter().filter_map(|r| r.medical_unit));
    counts.truncate(top_n);
    counts
}

/// One row of the record preview table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PreviewRow {
    pub sex: Sex,
    pub age: Option<i32>,
    pub patient_type: PatientType,
    pub mortality: bool,
    pub comorbidity_count: u8,
    pub diabetes: Option<i32>,
    pub cardiovascular: Option<i32>,
    pub hipertension: Option<i32>,
    pub obesity: Option<i32>,
    pub intubed: Option<i32>,
    pub icu: Option<i32>,
}

/// The first `limit` rows of the view, in row order
#[must_use]
pub fn record_preview(view: &FilteredView<'_>, limit: usize) -> Vec<PreviewRow> {
    view.iter()
        .take(limit)
        .map(|r| PreviewRow {
            sex: r.sex,
            age: r.age,
            patient_type: r.patient_type,
            mortality: r.mortality,
            comorbidity_count: r.comorbidity_count,
            diabetes: r.comorbidities.code(Comorbidity::Diabetes),
            cardiovascular: r.comorbidities.code(Comorbidity::Cardiovascular),
            hipertension: r.comorbidities.code(Comorbidity::Hypertension),
            obesity: r.comorbidities.code(Comorbidity::Obesity),
            intubed: r.intubed,
            icu: r.icu,
        })
        .collect()
}

/// Every aggregation for one filtered view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub coverage: Coverage,
    pub key_indicators: KeyIndicators,
    pub outcomes: OutcomeSummary,
    pub gender_distribution: Vec<CategoryCount<Sex>>,
    pub gender_mortality: Vec<MortalityGroup<Sex>>,
    pub age_band_mortality: Vec<MortalityGroup<AgeBand>>,
    pub patient_types: Vec<CategoryCount<PatientType>>,
    pub comorbidity_mortality: Vec<MortalityGroup<u8>>,
    pub critical_care: CriticalCareCounts,
    pub classifications: Vec<CategoryCount<Classification>>,
    pub excess_risk: Vec<ConditionRisk>,
    pub medical_units: Vec<CategoryCount<i32>>,
    pub preview: Vec<PreviewRow>,
}

impl DashboardSummary {
    #[must_use]
    pub fn compute(view: &FilteredView<'_>, config: &ReportConfig) -> Self {
        Self {
            coverage: coverage(view),
            key_indicators: key_indicators(view),
            outcomes: outcome_summary(view),
            gender_distribution: gender_distribution(view),
            gender_mortality: gender_mortality(view),
            age_band_mortality: age_band_mortality(view),
            patient_types: patient_type_distribution(view),
            comorbidity_mortality: comorbidity_mortality(view),
            critical_care: critical_care_utilization(view),
            classifications: classification_distribution(view),
            excess_risk: excess_risk(view),
            medical_units: medical_unit_distribution(view, config.top_medical_units),
            preview: record_preview(view, config.preview_rows),
        }
    }

    /// Plain-text report
    #[must_use]
    pub fn render_text(&self, include_preview: bool) -> String {
        let mut report = String::new();
        let ki = &self.key_indicators;

        report.push_str("COVID-19 Dashboard Summary:\n");
        report.push_str(&format!(
            "  Selected Records: {} of {} ({:.1}%)\n",
            self.coverage.selected, self.coverage.total, self.coverage.percent
        ));
        report.push_str(&format!("  Total Cases: {}\n", ki.total_cases));
        report.push_str(&format!("  Deaths: {}\n", ki.deaths));
        report.push_str(&format!("  Mortality Rate: {:.2}%\n", ki.mortality_rate));
        match ki.average_age {
            Some(age) => report.push_str(&format!("  Average Age: {age:.1}\n")),
            None => report.push_str("  Average Age: n/a\n"),
        }
        report.push_str(&format!("  Hospitalization Rate: {:.2}%\n", ki.hospitalization_rate));
        report.push_str(&format!(
            "  Outcomes: {} survived, {} deceased\n",
            self.outcomes.survived, self.outcomes.deceased
        ));

        push_mortality(&mut report, "Mortality by Age Band", &self.age_band_mortality);
        push_mortality(&mut report, "Mortality by Sex", &self.gender_mortality);
        push_counts(&mut report, "Sex Distribution", &self.gender_distribution, ki.total_cases);
        push_counts(&mut report, "Patient Types", &self.patient_types, ki.total_cases);
        push_mortality(
            &mut report,
            "Mortality by Comorbidity Count",
            &self.comorbidity_mortality,
        );

        report.push_str("\nCritical Care (status recorded):\n");
        report.push_str(&format!("  Intubation: {}\n", self.critical_care.intubated));
        report.push_str(&format!("  ICU: {}\n", self.critical_care.icu));
        report.push_str(&format!("  Both: {}\n", self.critical_care.both));

        push_counts(&mut report, "Classification", &self.classifications, ki.total_cases);

        report.push_str("\nExcess Mortality by Condition:\n");
        if self.excess_risk.is_empty() {
            report.push_str("  (no condition splits the selection)\n");
        }
        for risk in &self.excess_risk {
            report.push_str(&format!(
                "  {}: {:+.2} pts (with {:.2}%, without {:.2}%, prevalence {:.1}%)\n",
                risk.condition,
                risk.excess_risk,
                risk.mortality_with,
                risk.mortality_without,
                risk.prevalence
            ));
        }

        push_counts(&mut report, "Top Medical Units", &self.medical_units, ki.total_cases);

        if include_preview {
            report.push_str(&format!("\nRecord Preview ({} rows):\n", self.preview.len()));
            report.push_str(
                "  SEX      AGE  PATIENT_TYPE  MORTALITY  COMORB  DIAB  CARDIO  HIPERT  OBES  INTUB  ICU\n",
            );
            for row in &self.preview {
                report.push_str(&format!(
                    "  {:<8} {:>3}  {:<12}  {:<9}  {:>6}  {:>4}  {:>6}  {:>6}  {:>4}  {:>5}  {:>3}\n",
                    row.sex.label(),
                    code_text(row.age),
                    row.patient_type.label(),
                    row.mortality,
                    row.comorbidity_count,
                    code_text(row.diabetes),
                    code_text(row.cardiovascular),
                    code_text(row.hipertension),
                    code_text(row.obesity),
                    code_text(row.intubed),
                    code_text(row.icu),
                ));
            }
        }

        report
    }
}

fn push_mortality<K: std::fmt::Display>(report: &mut String, title: &str, groups: &[MortalityGroup<K>]) {
    report.push_str(&format!("\n{title}:\n"));
    if groups.is_empty() {
        report.push_str("  (no records)\n");
    }
    for group in groups {
        report.push_str(&format!(
            "  {}: {}/{} ({:.2}%)\n",
            group.key, group.deaths, group.total, group.mortality_rate
        ));
    }
}

fn push_counts<K: std::fmt::Display>(
    report: &mut String,
    title: &str,
    counts: &[CategoryCount<K>],
    total: usize,
) {
    report.push_str(&format!("\n{title}:\n"));
    if counts.is_empty() {
        report.push_str("  (no records)\n");
    }
    for entry in counts {
        report.push_str(&format!(
            "  {}: {} ({:.1}%)\n",
            entry.key,
            entry.count,
            percentage(entry.count, total)
        ));
    }
}

fn code_text(value: Option<i32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
