// ABOUTME: Parameter fitting configuration for the energy-balance regression
// ABOUTME: Coefficient bounds, energy density, algorithm selection, and model variant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Parameter Fitting Configuration
//!
//! The fitted model is `expenditure = alpha x weight + beta x net_steps + gamma x workout_kcal`.
//! Every coefficient is clamped to its [`CoefficientBounds`] after each fitting pass.
//!
//! The defaults assume body weight in pounds. For kilograms set
//! `kcal_per_mass_unit` to 7700 and scale the alpha bounds by 2.2046.

use std::fmt;
use std::str::FromStr;

use adaptive_tdee_core::constants::{
    coefficients::{
        ALPHA_DEFAULT, ALPHA_MAX, ALPHA_MIN, BETA_DEFAULT, BETA_MAX, BETA_MIN, GAMMA_DEFAULT,
        GAMMA_MAX, GAMMA_MIN,
    },
    energy::KCAL_PER_POUND,
    pipeline::MIN_REGRESSION_PAIRS,
};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Inclusive bounds plus a fallback value for one coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientBounds {
    /// Smallest allowed value
    pub min: f64,
    /// Largest allowed value
    pub max: f64,
    /// Fallback and iterative starting value
    pub default: f64,
}

impl CoefficientBounds {
    /// Create bounds with a fallback value
    #[must_use]
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Clamp a value into the bounds, mapping non-finite input to the default
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        let value = if value.is_finite() { value } else { self.default };
        value.max(self.min).min(self.max)
    }

    /// Whether a value lies within the bounds
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && self.contains(self.default)
    }
}

/// Which coefficients the fitter estimates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    /// Multi-parameter when any pair carries activity data, otherwise single-parameter
    #[default]
    Auto,
    /// Burn rate only; step and workout coefficients fixed at zero
    SingleParameter,
    /// Burn rate, per-step coefficient, and workout multiplier
    MultiParameter,
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::SingleParameter => f.write_str("single_parameter"),
            Self::MultiParameter => f.write_str("multi_parameter"),
        }
    }
}

impl FromStr for ModelVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "single" | "single_parameter" => Ok(Self::SingleParameter),
            "multi" | "multi_parameter" => Ok(Self::MultiParameter),
            other => Err(ConfigError::UnknownOption(format!(
                "model variant '{other}'. Valid options: auto, single_parameter, multi_parameter"
            ))),
        }
    }
}

/// Parameter fitter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingConfig {
    /// Fitting algorithm: `closed_form` or `projected_gradient`
    #[serde(default = "default_fit_algorithm")]
    pub algorithm: String,
    /// Coefficients to estimate
    pub variant: ModelVariant,
    /// Energy stored per unit of body mass (kcal per lb by default)
    pub kcal_per_mass_unit: f64,
    /// Fewest regression pairs that may produce a fit (never below 5)
    pub min_pairs: usize,
    /// Base burn rate bounds (kcal per mass unit per day)
    pub alpha: CoefficientBounds,
    /// Per-net-step bounds (kcal per step)
    pub beta: CoefficientBounds,
    /// Workout-calorie multiplier bounds
    pub gamma: CoefficientBounds,
    /// Step size for projected gradient descent
    pub gradient_learning_rate: f64,
    /// Iteration budget for projected gradient descent
    pub gradient_iterations: usize,
}

/// Default fitting algorithm (closed-form least squares)
fn default_fit_algorithm() -> String {
    "closed_form".to_owned()
}

impl Default for FittingConfig {
    fn default() -> Self {
        Self {
            algorithm: default_fit_algorithm(),
            variant: ModelVariant::Auto,
            kcal_per_mass_unit: KCAL_PER_POUND,
            min_pairs: MIN_REGRESSION_PAIRS,
            alpha: CoefficientBounds::new(ALPHA_MIN, ALPHA_MAX, ALPHA_DEFAULT),
            beta: CoefficientBounds::new(BETA_MIN, BETA_MAX, BETA_DEFAULT),
            gamma: CoefficientBounds::new(GAMMA_MIN, GAMMA_MAX, GAMMA_DEFAULT),
            gradient_learning_rate: 0.05,
            gradient_iterations: 5_000,
        }
    }
}
