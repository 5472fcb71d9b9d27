//! End-to-end runs: file on disk, load, filter, summarise

use covid_dashboard::models::{Outcome, PatientType, Sex};
use covid_dashboard::stats::{self, DashboardSummary, MortalityGroup};
use covid_dashboard::{DashboardConfig, FilterParams, FilteredView, ReportConfig, Selection, apply_filters, load_dataset};

use crate::utils::{decode, mixed_rows, patient, write_csv};

#[test]
fn test_gender_stats_from_csv() {
    let rows = vec![
        patient().sex(1).no_death_date().raw(),
        patient().sex(2).died("2021-03-01").raw(),
        patient().sex(1).no_death_date().raw(),
    ];
    let path = write_csv("gender-stats.csv", &rows);
    let dataset = load_dataset(&DashboardConfig::default().with_data_path(&path)).unwrap();

    let sexes: Vec<Sex> = dataset.iter().map(|r| r.sex).collect();
    assert_eq!(sexes, vec![Sex::Male, Sex::Female, Sex::Male]);
    let mortality: Vec<bool> = dataset.iter().map(|r| r.mortality).collect();
    assert_eq!(mortality, vec![false, true, false]);

    let view = apply_filters(&dataset, &FilterParams::default());
    assert_eq!(
        stats::gender_mortality(&view),
        vec![
            MortalityGroup { key: Sex::Male, deaths: 0, total: 2, mortality_rate: 0.0 },
            MortalityGroup { key: Sex::Female, deaths: 1, total: 1, mortality_rate: 100.0 },
        ]
    );

    std::fs::remove_file(path).ok();
}

#[test]
fn test_default_filters_keep_every_row() {
    let dataset = decode(mixed_rows());
    let view = apply_filters(&dataset, &FilterParams::new().with_age_range(0, 130));

    assert_eq!(view.len(), dataset.len());
    assert_eq!(view.row_indices(), (0..dataset.len()).collect::<Vec<_>>().as_slice());
}

#[test]
fn test_male_selection_keeps_order() {
    let dataset = decode(vec![
        patient().sex(1).age(30),
        patient().sex(2).age(31),
        patient().sex(1).age(32),
    ]);
    let params = FilterParams::new().with_genders(Selection::only([Sex::Male]));
    let view = apply_filters(&dataset, &params);

    assert_eq!(view.row_indices(), &[0, 2]);
    let ages: Vec<Option<i32>> = view.iter().map(|r| r.age).collect();
    assert_eq!(ages, vec![Some(30), Some(32)]);
}

#[test]
fn test_all_absent_indicators_count_zero() {
    let dataset = decode(vec![patient()]);
    assert_eq!(dataset[0].comorbidity_count, 0);
}

#[test]
fn test_empty_selection_summarises_to_zero() {
    let dataset = decode(mixed_rows());
    let params = FilterParams::new()
        .with_patient_types(Selection::only([PatientType::Ambulatory]))
        .with_outcomes(Selection::only([Outcome::Deceased]));
    let view = apply_filters(&dataset, &params);
    assert!(view.is_empty());

    let summary = DashboardSummary::compute(&view, &ReportConfig::default());
    assert_eq!(summary.coverage.selected, 0);
    assert_eq!(summary.coverage.total, dataset.len());
    assert_eq!(summary.key_indicators.mortality_rate, 0.0);
    assert_eq!(summary.key_indicators.average_age, None);
    assert!(summary.age_band_mortality.is_empty());
    assert!(summary.gender_mortality.is_empty());
    assert!(summary.comorbidity_mortality.is_empty());
    assert!(summary.patient_types.is_empty());
    assert!(summary.classifications.is_empty());
    assert!(summary.excess_risk.is_empty());
    assert!(summary.medical_units.is_empty());
    assert!(summary.preview.is_empty());
    assert_eq!(summary.critical_care.both, 0);

    let text = summary.render_text(true);
    assert!(text.contains("Selected Records: 0 of 10 (0.0%)"));
    assert!(text.contains("Record Preview (0 rows)"));
}

#[test]
fn test_hospitalized_deaths_summary() {
    let dataset = decode(mixed_rows());
    let params = FilterParams::new()
        .with_patient_types(Selection::only([PatientType::Hospitalized]))
        .with_outcomes(Selection::only([Outcome::Deceased]));
    let view = apply_filters(&dataset, &params);
    assert_eq!(view.row_indices(), &[1, 4, 7, 8]);

    let summary = DashboardSummary::compute(&view, &ReportConfig::default());
    assert_eq!(summary.key_indicators.deaths, 4);
    assert_eq!(summary.key_indicators.mortality_rate, 100.0);
    assert_eq!(summary.key_indicators.hospitalization_rate, 100.0);
    assert_eq!(summary.coverage.percent, 40.0);
    assert_eq!(summary.critical_care.icu, 2);
    assert_eq!(summary.critical_care.intubated, 3);
    assert_eq!(summary.critical_care.both, 2);
}

#[test]
fn test_summary_json_round_trips_through_serde_json() {
    let dataset = decode(mixed_rows());
    let view = FilteredView::all(&dataset);
    let summary = DashboardSummary::compute(&view, &ReportConfig { preview_rows: 3, top_medical_units: 1 });

    let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["key_indicators"]["total_cases"], 10);
    assert_eq!(json["preview"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["medical_units"][0]["key"], 4);
    assert_eq!(json["medical_units"][0]["count"], 10);
    assert_eq!(json["age_band_mortality"][0]["key"], "0-17");
}
