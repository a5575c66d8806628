// ABOUTME: Integration tests for confidence classification and scoring
// ABOUTME: Checks score monotonicity in sample size and error plus level thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use adaptive_tdee::config::intelligence::ConfidenceConfig;
use adaptive_tdee::intelligence::{classify_confidence, confidence_score, ConfidenceLevel};

const ERRORS: [f64; 8] = [0.0, 0.05, 0.1, 0.25, 0.35, 0.6, 0.9, 2.0];

#[test]
fn test_score_never_drops_with_more_samples() {
    let config = ConfidenceConfig::default();
    for standard_error in ERRORS {
        let scores: Vec<u8> = (0..60)
            .map(|samples| confidence_score(standard_error, samples, &config))
            .collect();
        assert!(
            scores.windows(2).all(|w| w[1] >= w[0]),
            "score decreased with samples at standard error {standard_error}"
        );
    }
}

#[test]
fn test_score_never_drops_with_lower_error() {
    let config = ConfidenceConfig::default();
    for samples in [0, 5, 10, 14, 28, 40] {
        let scores: Vec<u8> = ERRORS
            .iter()
            .rev()
            .map(|se| confidence_score(*se, samples, &config))
            .collect();
        assert!(
            scores.windows(2).all(|w| w[1] >= w[0]),
            "score decreased with lower error at {samples} samples"
        );
    }
}

#[test]
fn test_score_is_bounded() {
    let config = ConfidenceConfig::default();
    for standard_error in [-1.0, 0.0, 0.5, 100.0, f64::INFINITY, f64::NAN] {
        for samples in [0, 1, 1_000] {
            assert!(confidence_score(standard_error, samples, &config) <= 100);
        }
    }
}

#[test]
fn test_level_never_drops_with_more_samples() {
    let config = ConfidenceConfig::default();
    for standard_error in ERRORS {
        for r_squared in [0.0, 0.05, 0.5, 0.95] {
            let levels: Vec<ConfidenceLevel> = (0..40)
                .map(|samples| classify_confidence(standard_error, r_squared, samples, &config))
                .collect();
            assert!(levels.windows(2).all(|w| w[1] >= w[0]));
        }
    }
}

#[test]
fn test_stable_requires_every_condition() {
    let config = ConfidenceConfig::default();
    assert_eq!(
        classify_confidence(0.1, 0.6, 21, &config),
        ConfidenceLevel::Stable
    );
    // Too few pairs
    assert_ne!(
        classify_confidence(0.1, 0.6, 13, &config),
        ConfidenceLevel::Stable
    );
    // Error at the threshold is not strictly below it
    assert_ne!(
        classify_confidence(config.stable_max_standard_error, 0.6, 21, &config),
        ConfidenceLevel::Stable
    );
    // R-squared at the threshold is not strictly above it
    assert_ne!(
        classify_confidence(0.1, config.stable_min_r_squared, 21, &config),
        ConfidenceLevel::Stable
    );
}

#[test]
fn test_sample_thresholds_are_exclusive() {
    let config = ConfidenceConfig::default();
    assert_eq!(
        classify_confidence(0.1, 0.6, config.stable_min_pairs, &config),
        ConfidenceLevel::Stabilizing
    );
    assert_eq!(
        classify_confidence(0.1, 0.6, config.stable_min_pairs + 1, &config),
        ConfidenceLevel::Stable
    );

    // Noisy fits qualify for stabilizing on sample size alone
    assert_eq!(
        classify_confidence(0.9, 0.0, config.stabilizing_min_pairs, &config),
        ConfidenceLevel::Unstable
    );
    assert_eq!(
        classify_confidence(0.9, 0.0, config.stabilizing_min_pairs + 1, &config),
        ConfidenceLevel::Stabilizing
    );
}

#[test]
fn test_noisy_sparse_fit_is_unstable() {
    let config = ConfidenceConfig::default();
    assert_eq!(
        classify_confidence(0.8, 0.9, 6, &config),
        ConfidenceLevel::Unstable
    );
    assert_eq!(
        classify_confidence(f64::NAN, 0.0, 6, &config),
        ConfidenceLevel::Unstable
    );
}

#[test]
fn test_level_serializes_lowercase() {
    let json = serde_json::to_string(&ConfidenceLevel::Stabilizing).unwrap();
    assert_eq!(json, "\"stabilizing\"");
    assert_eq!(ConfidenceLevel::Stable.to_string(), "stable");
    let parsed: ConfidenceLevel = serde_json::from_str("\"unstable\"").unwrap();
    assert_eq!(parsed, ConfidenceLevel::Unstable);
}
