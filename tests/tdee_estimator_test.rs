// ABOUTME: Integration tests for the end-to-end TDEE estimation pipeline
// ABOUTME: Covers the worked example, data boundaries, determinism, and degenerate series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use adaptive_tdee::config::intelligence::{EnergyBalanceConfig, ModelVariant};
use adaptive_tdee::errors::ErrorCode;
use adaptive_tdee::intelligence::{
    estimate_tdee, ConfidenceLevel, Estimate, EstimateOutcome, EstimateParams,
    InsufficientDataReason,
};
use adaptive_tdee::models::DailyObservation;
use common::{
    day, init_test_logging, last_date, linear_series, simulated_active_series,
    worked_example_series,
};

fn estimate(observations: &[DailyObservation], current_weight: f64) -> EstimateOutcome {
    let params = EstimateParams::new(current_weight, last_date(observations));
    estimate_tdee(observations, &params, &EnergyBalanceConfig::default()).unwrap()
}

fn expect_estimate(outcome: EstimateOutcome) -> Estimate {
    match outcome {
        EstimateOutcome::Estimated(estimate) => *estimate,
        EstimateOutcome::InsufficientData(missing) => panic!("expected an estimate: {missing}"),
    }
}

#[test]
fn test_worked_example_21_day_decline() {
    init_test_logging();
    let observations = worked_example_series();
    let estimate = expect_estimate(estimate(&observations, 194.9));

    assert!(
        (11.0..=18.0).contains(&estimate.alpha()),
        "alpha {} outside plausible range",
        estimate.alpha()
    );
    assert!((estimate.estimated_tdee - estimate.alpha() * 194.9).abs() < 1e-6);
    assert!(matches!(
        estimate.confidence,
        ConfidenceLevel::Stable | ConfidenceLevel::Stabilizing
    ));
    assert_eq!(estimate.history.len(), 21 - 7 + 1);
    assert_eq!(estimate.observations_used, 21);
    assert_eq!(estimate.pairs_before_exclusion, 20);
    assert_eq!(estimate.window_days, 28);
    assert_eq!(estimate.model.variant, ModelVariant::SingleParameter);
}

#[test]
fn test_history_is_chronological_and_ends_at_current_fit() {
    let observations = worked_example_series();
    let estimate = expect_estimate(estimate(&observations, 194.9));

    let first = estimate.history.first().unwrap();
    let last = estimate.history.last().unwrap();
    assert_eq!(first.date, day(6));
    assert_eq!(last.date, day(20));
    assert!(estimate
        .history
        .windows(2)
        .all(|pair| pair[0].date < pair[1].date));
    assert!((last.alpha - estimate.alpha()).abs() < 1e-12);
    assert_eq!(last.confidence_score, estimate.confidence_score);
}

#[test]
fn test_minimum_data_points_boundary() {
    let config = EnergyBalanceConfig::default();
    let min = config.window.min_data_points;

    let short = linear_series(min - 1, 180.0, 179.0, 2300.0);
    match estimate(&short, 179.0) {
        EstimateOutcome::InsufficientData(missing) => {
            assert_eq!(missing.reason, InsufficientDataReason::TooFewObservations);
            assert_eq!(missing.available, min - 1);
            assert_eq!(missing.required, min);
        }
        EstimateOutcome::Estimated(_) => panic!("expected insufficient data"),
    }

    let exact = linear_series(min, 180.0, 179.0, 2300.0);
    let estimate = expect_estimate(estimate(&exact, 179.0));
    assert_eq!(estimate.observations_used, min);
    assert!(estimate.pairs_after_exclusion() >= 5);
}

#[test]
fn test_gaps_leave_too_few_pairs() {
    // Every other day logged: enough observations, no consecutive pairs
    let observations: Vec<DailyObservation> = (0..10)
        .map(|i| DailyObservation::new(day(i * 2), 180.0 - 0.1 * i as f64, 2200.0))
        .collect();
    match estimate(&observations, 178.0) {
        EstimateOutcome::InsufficientData(missing) => {
            assert_eq!(missing.reason, InsufficientDataReason::TooFewPairs);
            assert_eq!(missing.available, 0);
            assert_eq!(missing.required, 5);
        }
        EstimateOutcome::Estimated(_) => panic!("expected insufficient pairs"),
    }
}

#[test]
fn test_permuted_input_yields_identical_estimate() {
    let observations = simulated_active_series(28);
    let mut reversed = observations.clone();
    reversed.reverse();
    let mut interleaved: Vec<DailyObservation> = observations
        .iter()
        .step_by(2)
        .chain(observations.iter().skip(1).step_by(2))
        .cloned()
        .collect();
    // A duplicate date must collapse the same way regardless of position
    interleaved.push(DailyObservation::new(day(5), 300.0, 2100.0));
    let mut with_duplicate = observations.clone();
    with_duplicate.insert(0, DailyObservation::new(day(5), 300.0, 2100.0));

    let baseline = estimate(&with_duplicate, 184.0);
    assert_eq!(estimate(&interleaved, 184.0), baseline);

    let mut reversed_duplicate = reversed;
    reversed_duplicate.push(DailyObservation::new(day(5), 300.0, 2100.0));
    assert_eq!(estimate(&reversed_duplicate, 184.0), baseline);
}

#[test]
fn test_constant_weight_series_is_handled() {
    let observations = linear_series(21, 180.0, 180.0, 2700.0);
    let estimate = expect_estimate(estimate(&observations, 180.0));

    // Zero weight change implies expenditure equals intake
    assert!((estimate.alpha() - 15.0).abs() < 1e-6);
    assert!(estimate.r_squared().abs() < f64::EPSILON);
    assert!(estimate.standard_error().is_finite());
    assert_eq!(estimate.model.pairs_excluded, 0);
}

#[test]
fn test_active_series_uses_multi_parameter_model() {
    let observations = simulated_active_series(28);
    let estimate = expect_estimate(estimate(&observations, 184.0));
    let config = EnergyBalanceConfig::default();

    assert_eq!(estimate.model.variant, ModelVariant::MultiParameter);
    assert!(config.fitting.alpha.contains(estimate.alpha()));
    assert!(config.fitting.beta.contains(estimate.beta()));
    assert!(config.fitting.gamma.contains(estimate.gamma()));
    assert!((0.0..=1.0).contains(&estimate.r_squared()));
    assert!(estimate.estimated_tdee >= estimate.alpha() * 184.0);
}

#[test]
fn test_single_parameter_variant_ignores_activity() {
    let observations = simulated_active_series(28);
    let mut config = EnergyBalanceConfig::default();
    config.fitting.variant = ModelVariant::SingleParameter;
    let params = EstimateParams::new(184.0, last_date(&observations));

    let outcome = estimate_tdee(&observations, &params, &config).unwrap();
    let estimate = outcome.estimate().unwrap();
    assert_eq!(estimate.model.variant, ModelVariant::SingleParameter);
    assert!(estimate.beta().abs() < f64::EPSILON);
    assert!(estimate.gamma().abs() < f64::EPSILON);
    assert!((estimate.estimated_tdee - estimate.alpha() * 184.0).abs() < 1e-6);
}

#[test]
fn test_incomplete_days_are_excluded_by_default() {
    let mut observations = worked_example_series();
    for obs in observations.iter_mut().take(3) {
        obs.complete = false;
    }
    let estimate = expect_estimate(estimate(&observations, 194.9));
    assert_eq!(estimate.observations_used, 18);

    let mut config = EnergyBalanceConfig::default();
    config.window.exclude_incomplete = false;
    let params = EstimateParams::new(194.9, last_date(&observations));
    let outcome = estimate_tdee(&observations, &params, &config).unwrap();
    assert_eq!(outcome.estimate().unwrap().observations_used, 21);
}

#[test]
fn test_window_is_trailing_from_reference_date() {
    let observations = linear_series(60, 200.0, 190.0, 2300.0);
    let params = EstimateParams::new(195.0, day(40));
    let outcome =
        estimate_tdee(&observations, &params, &EnergyBalanceConfig::default()).unwrap();
    let estimate = outcome.estimate().unwrap();

    // 28-day window ending on day 40 covers days 13..=40
    assert_eq!(estimate.observations_used, 28);
    assert_eq!(estimate.as_of, day(40));
    assert_eq!(estimate.history.last().unwrap().date, day(40));
}

#[test]
fn test_invalid_current_weight_is_an_error() {
    let observations = worked_example_series();
    let params = EstimateParams::new(0.0, last_date(&observations));
    let err = estimate_tdee(&observations, &params, &EnergyBalanceConfig::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let params = EstimateParams::new(f64::NAN, last_date(&observations));
    assert!(estimate_tdee(&observations, &params, &EnergyBalanceConfig::default()).is_err());
}

#[test]
fn test_invalid_config_is_an_error() {
    let observations = worked_example_series();
    let mut config = EnergyBalanceConfig::default();
    config.fitting.alpha.min = 25.0;
    let params = EstimateParams::new(194.9, last_date(&observations));
    let err = estimate_tdee(&observations, &params, &config).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_estimate_wire_shape() {
    let observations = worked_example_series();
    let outcome = estimate(&observations, 194.9);
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["status"], "estimated");
    assert!(json["alpha"].is_number());
    assert!(json["estimated_tdee"].is_number());
    assert!(matches!(
        json["confidence"].as_str(),
        Some("stable" | "stabilizing")
    ));
    assert_eq!(json["history"].as_array().unwrap().len(), 15);

    let restored: EstimateOutcome = serde_json::from_value(json).unwrap();
    let restored = restored.estimate().unwrap();
    let original = outcome.estimate().unwrap();
    assert_eq!(restored.history.len(), original.history.len());
    assert_eq!(restored.confidence, original.confidence);
    assert!((restored.alpha() - original.alpha()).abs() < 1e-9);
}

#[test]
fn test_insufficient_data_wire_shape() {
    let observations = linear_series(3, 180.0, 179.8, 2200.0);
    let json = serde_json::to_value(estimate(&observations, 179.8)).unwrap();
    assert_eq!(json["status"], "insufficient_data");
    assert_eq!(json["reason"], "too_few_observations");
    assert_eq!(json["available"], 3);
    assert_eq!(json["required"], 7);
}
