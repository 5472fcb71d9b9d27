//! Aggregation properties over seeded synthetic datasets

use covid_dashboard::models::types::PRESENT_CODE;
use covid_dashboard::models::{Comorbidity, PatientType, Sex};
use covid_dashboard::stats;
use covid_dashboard::synth::generate_raw_records;
use covid_dashboard::{Dataset, Decoder, FilterParams, FilteredView, ReportConfig, Selection, apply_filters};

fn synthetic(n: usize, seed: u64) -> Dataset {
    Decoder::default().decode(generate_raw_records(n, seed))
}

fn views_to_check() -> Vec<FilterParams> {
    vec![
        FilterParams::default(),
        FilterParams::new().with_age_range(-10, 200),
        FilterParams::new().with_genders(Selection::only([Sex::Female])),
        FilterParams::new().with_patient_types(Selection::only([PatientType::Hospitalized])),
        FilterParams::new().with_min_comorbidities(3),
        FilterParams::new().with_age_range(130, 130),
    ]
}

fn assert_rate(rate: f64) {
    assert!((0.0..=100.0).contains(&rate), "rate {rate} out of range");
}

#[test]
fn test_rates_within_bounds() {
    let dataset = synthetic(5_000, 21);
    for params in views_to_check() {
        let view = apply_filters(&dataset, &params);

        let groups = stats::age_band_mortality(&view)
            .into_iter()
            .map(|g| (g.deaths, g.total, g.mortality_rate))
            .chain(stats::gender_mortality(&view).into_iter().map(|g| (g.deaths, g.total, g.mortality_rate)))
            .chain(
                stats::comorbidity_mortality(&view)
                    .into_iter()
                    .map(|g| (g.deaths, g.total, g.mortality_rate)),
            );
        for (deaths, total, rate) in groups {
            assert!(total > 0);
            assert!(deaths <= total);
            assert_rate(rate);
        }

        for risk in stats::excess_risk(&view) {
            assert_rate(risk.mortality_with);
            assert_rate(risk.mortality_without);
            assert_rate(risk.prevalence);
            assert!((-100.0..=100.0).contains(&risk.excess_risk));
        }

        let indicators = stats::key_indicators(&view);
        assert_rate(indicators.mortality_rate);
        assert_rate(indicators.hospitalization_rate);
        assert_rate(stats::coverage(&view).percent);
    }
}

#[test]
fn test_age_band_totals_cover_in_range_ages() {
    let dataset = synthetic(20_000, 22);
    // Wider than the band range, so out-of-range ages reach the view
    let view = apply_filters(&dataset, &FilterParams::new().with_age_range(-10, 200));

    let banded: usize = stats::age_band_mortality(&view).iter().map(|b| b.total).sum();
    let in_range = view
        .iter()
        .filter(|r| r.age.is_some_and(|a| (0..=130).contains(&a)))
        .count();
    assert_eq!(banded, in_range);
    assert!(in_range < view.len(), "fixture should contain out-of-range ages");
}

#[test]
fn test_comorbidity_count_matches_indicators() {
    let raw = generate_raw_records(5_000, 23);
    let dataset = Decoder::default().decode(raw.clone());

    for (record, raw) in dataset.iter().zip(&raw) {
        let expected = raw
            .comorbidities
            .iter()
            .filter(|c| **c == Some(i64::from(PRESENT_CODE)))
            .count();
        assert!(record.comorbidity_count <= 10);
        assert_eq!(usize::from(record.comorbidity_count), expected);
    }
}

#[test]
fn test_excess_risk_never_reports_one_sided_split() {
    let dataset = synthetic(3_000, 24);
    for params in views_to_check() {
        let view = apply_filters(&dataset, &params);
        let risks = stats::excess_risk(&view);

        for risk in &risks {
            assert!(risk.with_condition > 0);
            assert!(risk.without_condition > 0);
            assert_eq!(risk.with_condition + risk.without_condition, view.len());
        }
        assert!(risks.windows(2).all(|w| w[0].excess_risk >= w[1].excess_risk));

        for condition in Comorbidity::ALL {
            let with = view.iter().filter(|r| r.has(condition)).count();
            let reported = risks.iter().any(|r| r.condition == condition);
            assert_eq!(reported, with > 0 && with < view.len(), "{condition:?}");
        }
    }
}

#[test]
fn test_distributions_account_for_every_row() {
    let dataset = synthetic(4_000, 25);
    let view = FilteredView::all(&dataset);

    let by_sex: usize = stats::gender_distribution(&view).iter().map(|c| c.count).sum();
    let by_type: usize = stats::patient_type_distribution(&view).iter().map(|c| c.count).sum();
    let by_class: usize = stats::classification_distribution(&view).iter().map(|c| c.count).sum();
    assert_eq!(by_sex, view.len());
    assert_eq!(by_type, view.len());
    assert_eq!(by_class, view.len());

    let outcomes = stats::outcome_summary(&view);
    assert_eq!(outcomes.survived + outcomes.deceased, view.len());

    let care = stats::critical_care_utilization(&view);
    assert!(care.both <= care.icu.min(care.intubated));
}

#[test]
fn test_summary_respects_report_sizes() {
    let dataset = synthetic(1_000, 26);
    let view = FilteredView::all(&dataset);
    let config = ReportConfig {
        preview_rows: 7,
        top_medical_units: 3,
    };
    let summary = stats::DashboardSummary::compute(&view, &config);

    assert_eq!(summary.preview.len(), 7);
    assert_eq!(summary.medical_units.len(), 3);
    assert!(summary.medical_units.windows(2).all(|w| w[0].count >= w[1].count));
}
