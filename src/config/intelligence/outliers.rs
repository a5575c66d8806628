// ABOUTME: Outlier rejection configuration for intake screening and residual exclusion
// ABOUTME: Thresholds, trimming floor, percentile, and the intake threshold combination policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Outlier Rejection Configuration
//!
//! Two independent screens run before the final fit:
//!
//! - **Intake outliers** flag days whose logged intake is implausibly low
//!   (usually forgotten meals) so they never become regression pairs.
//! - **Residual outliers** drop pairs whose first-pass residual z-score is
//!   extreme before the second fitting pass.

use std::fmt;
use std::str::FromStr;

use adaptive_tdee_core::constants::pipeline::MIN_COMPLETE_DAYS_FOR_INTAKE_STATS;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// How the mean/SD threshold and the percentile threshold are combined
///
/// A day is flagged when its intake is strictly below the combined threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeThresholdPolicy {
    /// Use the lower of the two thresholds (flags only days anomalous by both)
    #[default]
    Min,
    /// Use the higher of the two thresholds (flags days anomalous by either)
    Max,
}

impl IntakeThresholdPolicy {
    /// Combine the two candidate thresholds
    #[must_use]
    pub fn combine(self, sd_threshold: f64, percentile_threshold: f64) -> f64 {
        match self {
            Self::Min => sd_threshold.min(percentile_threshold),
            Self::Max => sd_threshold.max(percentile_threshold),
        }
    }
}

impl fmt::Display for IntakeThresholdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Min => f.write_str("min"),
            Self::Max => f.write_str("max"),
        }
    }
}

impl FromStr for IntakeThresholdPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "min" | "lower" => Ok(Self::Min),
            "max" | "higher" => Ok(Self::Max),
            other => Err(ConfigError::UnknownOption(format!(
                "intake threshold policy '{other}'. Valid options: min, max"
            ))),
        }
    }
}

/// Intake-outlier detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeOutlierConfig {
    /// Standard deviations below the trimmed mean that mark an outlier
    pub sd_multiplier: f64,
    /// Intake below this is treated as clearly incomplete logging (kcal)
    pub absolute_floor_kcal: f64,
    /// Low percentile of complete-day intake used as the second threshold (0-1)
    pub percentile: f64,
    /// Complete days required before any day is flagged
    pub min_complete_days: usize,
    /// Combination rule for the two thresholds
    pub policy: IntakeThresholdPolicy,
}

impl Default for IntakeOutlierConfig {
    fn default() -> Self {
        Self {
            sd_multiplier: 2.0,
            absolute_floor_kcal: 800.0,
            percentile: 0.15,
            min_complete_days: MIN_COMPLETE_DAYS_FOR_INTAKE_STATS,
            policy: IntakeThresholdPolicy::Min,
        }
    }
}

/// Residual-outlier excluder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualOutlierConfig {
    /// Absolute residual z-score above which a pair is excluded
    pub residual_z_threshold: f64,
    /// Residual SD below which exclusion is skipped entirely
    pub min_residual_std: f64,
}

impl Default for ResidualOutlierConfig {
    fn default() -> Self {
        Self {
            residual_z_threshold: 2.5,
            min_residual_std: 1e-6,
        }
    }
}
