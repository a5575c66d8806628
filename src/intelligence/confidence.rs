// ABOUTME: Confidence classification and scoring for fitted energy-balance models
// ABOUTME: Maps standard error, R-squared, and sample size to a level and a 0-100 score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use super::energy_balance::FittedModel;
use crate::config::intelligence::ConfidenceConfig;

/// Discrete trust level of an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// Too little data or too much noise to rely on
    Unstable,
    /// Usable, still converging
    Stabilizing,
    /// Precise, explanatory, and well sampled
    Stable,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unstable => f.write_str("unstable"),
            Self::Stabilizing => f.write_str("stabilizing"),
            Self::Stable => f.write_str("stable"),
        }
    }
}

/// Classify fit quality
#[must_use]
pub fn classify_confidence(
    standard_error: f64,
    r_squared: f64,
    samples: usize,
    config: &ConfidenceConfig,
) -> ConfidenceLevel {
    if standard_error < config.stable_max_standard_error
        && r_squared > config.stable_min_r_squared
        && samples > config.stable_min_pairs
    {
        ConfidenceLevel::Stable
    } else if standard_error < config.stabilizing_max_standard_error
        || samples > config.stabilizing_min_pairs
    {
        ConfidenceLevel::Stabilizing
    } else {
        ConfidenceLevel::Unstable
    }
}

/// Numeric confidence in `0..=100`
///
/// Half saturates with sample size at `score_full_pairs`, half falls linearly
/// with standard error and reaches zero at `score_zero_standard_error`. Never
/// decreases with more samples or lower error.
#[must_use]
pub fn confidence_score(standard_error: f64, samples: usize, config: &ConfidenceConfig) -> u8 {
    let sample_part = (samples as f64 / config.score_full_pairs as f64).min(1.0);
    let precision_part = if standard_error.is_finite() {
        (1.0 - standard_error.max(0.0) / config.score_zero_standard_error).max(0.0)
    } else {
        0.0
    };

    50.0f64
        .mul_add(sample_part, 50.0 * precision_part)
        .round()
        .clamp(0.0, 100.0) as u8
}

/// Level and score of a fitted model
#[must_use]
pub fn assess_model(model: &FittedModel, config: &ConfidenceConfig) -> (ConfidenceLevel, u8) {
    (
        classify_confidence(
            model.standard_error,
            model.r_squared,
            model.pairs_used,
            config,
        ),
        confidence_score(model.standard_error, model.pairs_used, config),
    )
}
