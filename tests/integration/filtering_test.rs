//! Filter properties over seeded synthetic datasets

use covid_dashboard::filter::{FilterCriteria, OptionCategory, available_options};
use covid_dashboard::models::{Outcome, PatientType, Sex};
use covid_dashboard::synth::generate_raw_records;
use covid_dashboard::{Dataset, Decoder, FilterParams, Selection, apply_filters};

fn synthetic(n: usize, seed: u64) -> Dataset {
    Decoder::default().decode(generate_raw_records(n, seed))
}

/// A spread of parameter sets covering every filter and their combinations
fn param_grid() -> Vec<FilterParams> {
    vec![
        FilterParams::default(),
        FilterParams::new().with_genders(Selection::only([Sex::Female])),
        FilterParams::new().with_genders(Selection::only([Sex::Male, Sex::Unknown])),
        FilterParams::new().with_patient_types(Selection::only([PatientType::Hospitalized])),
        FilterParams::new().with_age_range(18, 64),
        FilterParams::new().with_age_range(80, 80),
        FilterParams::new().with_age_range(70, 20),
        FilterParams::new().with_outcomes(Selection::only([Outcome::Deceased])),
        FilterParams::new().with_icu_only(true),
        FilterParams::new().with_min_comorbidities(2),
        FilterParams::new()
            .with_genders(Selection::only([Sex::Female]))
            .with_patient_types(Selection::only([PatientType::Hospitalized]))
            .with_age_range(50, 90)
            .with_outcomes(Selection::only([Outcome::Survived]))
            .with_icu_only(true)
            .with_min_comorbidities(1),
        FilterParams::new().with_min_comorbidities(11),
    ]
}

#[test]
fn test_view_is_ordered_subsequence() {
    let dataset = synthetic(3_000, 11);
    for params in param_grid() {
        let view = apply_filters(&dataset, &params);
        assert!(view.len() <= dataset.len());
        assert!(view.row_indices().windows(2).all(|w| w[0] < w[1]), "{params:?}");
        assert!(view.row_indices().iter().all(|&i| i < dataset.len()));
    }
}

#[test]
fn test_filtering_is_idempotent() {
    let dataset = synthetic(2_000, 12);
    for params in param_grid() {
        let first = apply_filters(&dataset, &params);
        let second = apply_filters(&dataset, &params);
        assert_eq!(first.row_indices(), second.row_indices(), "{params:?}");
    }
}

#[test]
fn test_every_kept_row_meets_every_filter() {
    let dataset = synthetic(3_000, 13);
    for params in param_grid() {
        let view = apply_filters(&dataset, &params);
        let filters = params.to_filters();
        for record in view.iter() {
            assert!(filters.iter().all(|f| f.meets_criteria(record)), "{params:?}");
        }

        // Rows left out fail at least one filter
        let kept: std::collections::HashSet<usize> = view.row_indices().iter().copied().collect();
        for (index, record) in dataset.iter().enumerate() {
            if !kept.contains(&index) {
                assert!(!filters.iter().all(|f| f.meets_criteria(record)));
            }
        }
    }
}

#[test]
fn test_filtered_rows_match_params() {
    let dataset = synthetic(3_000, 14);
    let params = FilterParams::new()
        .with_genders(Selection::only([Sex::Male]))
        .with_age_range(30, 60)
        .with_icu_only(true)
        .with_min_comorbidities(1);
    let view = apply_filters(&dataset, &params);
    assert!(!view.is_empty());

    for record in view.iter() {
        assert_eq!(record.sex, Sex::Male);
        assert!(record.age.is_some_and(|a| (30..=60).contains(&a)));
        assert!(matches!(record.icu, Some(1) | Some(2)));
        assert!(record.comorbidity_count >= 1);
    }
}

#[test]
fn test_missing_and_out_of_range_ages_never_pass() {
    let dataset = synthetic(20_000, 15);
    let view = apply_filters(&dataset, &FilterParams::default());

    let in_range = dataset
        .iter()
        .filter(|r| r.age.is_some_and(|a| (0..=130).contains(&a)))
        .count();
    assert_eq!(view.len(), in_range);
    assert!(view.len() < dataset.len());
}

#[test]
fn test_inverted_age_range_yields_empty_view() {
    let dataset = synthetic(500, 16);
    let view = apply_filters(&dataset, &FilterParams::new().with_age_range(70, 20));
    assert!(view.is_empty());
}

#[test]
fn test_patient_type_options_narrow_with_gender() {
    let dataset = synthetic(3_000, 17);
    let all = available_options(&dataset, OptionCategory::PatientType, &FilterParams::new());

    for sex in [Sex::Male, Sex::Female, Sex::Unknown] {
        let params = FilterParams::new().with_genders(Selection::only([sex]));
        let narrowed = available_options(&dataset, OptionCategory::PatientType, &params);
        assert!(narrowed.iter().all(|label| all.contains(label)));

        // Present types, in declaration order
        let expected: Vec<&str> = PatientType::ALL
            .iter()
            .filter(|t| dataset.iter().any(|r| r.sex == sex && r.patient_type == **t))
            .map(|t| t.label())
            .collect();
        assert_eq!(narrowed, expected);
    }
}
