//! Reproducible synthetic surveillance rows
//!
//! Generated rows exercise every path of the decoder: recorded and unknown codes,
//! codes outside every mapping, missing values, the no-date sentinel, several date
//! layouts and ages outside the plausible range.

use chrono::{Duration, NaiveDate};
use rand::prelude::*;

use crate::models::RawRecord;
use crate::models::types::{ABSENT_CODE, PRESENT_CODE, UNKNOWN_CODE};

/// Sentinel written for survivors
pub const NO_DATE: &str = "9999-99-99";

const FIRST_DEATH: (i32, u32, u32) = (2020, 1, 1);
const DEATH_WINDOW_DAYS: i64 = 540;
const MEDICAL_UNITS: i64 = 13;

/// Generate `n` coded rows from a fixed seed; the same seed gives the same rows
#[must_use]
pub fn generate_raw_records(n: usize, seed: u64) -> Vec<RawRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| generate_row(&mut rng)).collect()
}

fn generate_row(rng: &mut StdRng) -> RawRecord {
    let age = generate_age(rng);
    let patient_type = pick_code(rng, &[(1, 78), (2, 20), (i64::from(UNKNOWN_CODE), 1), (3, 1)]);
    let hospitalized = patient_type == Some(2);

    // Older patients carry more conditions
    let condition_odds = age.map_or(0.15, |a| (a.clamp(0, 100) as f64 / 250.0).max(0.05));
    let comorbidities = std::array::from_fn(|_| indicator_code(rng, condition_odds));
    let present = comorbidities
        .iter()
        .filter(|c| **c == Some(i64::from(PRESENT_CODE)))
        .count();

    let mut death_odds = 0.02 + condition_odds * 0.3 + present as f64 * 0.03;
    if hospitalized {
        death_odds += 0.25;
    }
    let date_died = generate_death_date(rng, death_odds.min(0.95));

    let (icu, intubed) = if hospitalized {
        (indicator_code(rng, 0.2), indicator_code(rng, 0.15))
    } else {
        let unknown = Some(i64::from(UNKNOWN_CODE));
        (unknown, unknown)
    };

    RawRecord {
        sex: pick_code(rng, &[(1, 48), (2, 49), (i64::from(UNKNOWN_CODE), 2), (99, 1)]),
        patient_type,
        classification: pick_code(
            rng,
            &[(1, 8), (2, 5), (3, 45), (4, 3), (5, 10), (6, 4), (7, 24), (0, 1)],
        ),
        age,
        date_died,
        icu,
        intubed,
        medical_unit: (!rng.random_bool(0.01)).then(|| rng.random_range(1..=MEDICAL_UNITS)),
        comorbidities,
    }
}

/// Weighted choice over codes; about one row in two hundred is missing
fn pick_code(rng: &mut StdRng, weights: &[(i64, u32)]) -> Option<i64> {
    if rng.random_bool(0.005) {
        return None;
    }
    let total: u32 = weights.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random_range(0..total);
    for (code, weight) in weights {
        if roll < *weight {
            return Some(*code);
        }
        roll -= weight;
    }
    weights.last().map(|(code, _)| *code)
}

fn generate_age(rng: &mut StdRng) -> Option<i64> {
    match rng.random_range(0..1000) {
        0..=2 => None,
        3..=4 => Some(rng.random_range(131..=150)),
        5 => Some(-1),
        _ => Some(rng.random_range(0..=100)),
    }
}

fn indicator_code(rng: &mut StdRng, odds: f64) -> Option<i64> {
    match rng.random_range(0..100) {
        0..=1 => Some(i64::from(UNKNOWN_CODE)),
        2 => Some(98),
        _ if rng.random_bool(odds) => Some(i64::from(PRESENT_CODE)),
        _ => Some(i64::from(ABSENT_CODE)),
    }
}

fn generate_death_date(rng: &mut StdRng, odds: f64) -> Option<String> {
    if !rng.random_bool(odds) {
        return match rng.random_range(0..200) {
            0 => None,
            1 => Some(String::new()),
            _ => Some(NO_DATE.to_string()),
        };
    }

    let (year, month, day) = FIRST_DEATH;
    let Some(start) = NaiveDate::from_ymd_opt(year, month, day) else {
        return Some(NO_DATE.to_string());
    };
    let date = start + Duration::days(rng.random_range(0..DEATH_WINDOW_DAYS));

    let text = match rng.random_range(0..100) {
        0 => "not recorded".to_string(),
        1..=10 => date.format("%d/%m/%Y").to_string(),
        _ => date.format("%Y-%m-%d").to_string(),
    };
    Some(text)
}
