// ABOUTME: Energy-balance estimator configuration with sectioned defaults and validation
// ABOUTME: Orchestrates domain-specific configs and provides unified env loading and a global instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Estimator Configuration Module
//!
//! Provides type-safe configuration for every stage of the adaptive TDEE
//! pipeline.
//!
//! # Module Structure
//!
//! - `window` - Trailing window, minimum data points, completeness filter, smoothing width
//! - `outliers` - Intake-outlier thresholds and residual z-score exclusion
//! - `fitting` - Coefficient bounds, energy density, algorithm and variant selection
//! - `confidence` - Stable/stabilizing thresholds and score scaling
//! - `forecast` - Forecast interval and goal-date projection settings

/// Confidence level thresholds and score scaling
pub mod confidence;
pub mod error;
pub mod fitting;
/// Forecast interval and goal-date band
pub mod forecast;
pub mod outliers;
/// Trailing window and smoothing settings
pub mod window;

pub use confidence::ConfidenceConfig;
pub use error::ConfigError;
pub use fitting::{CoefficientBounds, FittingConfig, ModelVariant};
pub use forecast::ForecastConfig;
pub use outliers::{IntakeOutlierConfig, IntakeThresholdPolicy, ResidualOutlierConfig};
pub use window::WindowConfig;

use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use adaptive_tdee_core::constants::pipeline::MIN_REGRESSION_PAIRS;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::intelligence::algorithms::FitAlgorithm;

/// Global configuration singleton
static ENERGY_BALANCE_CONFIG: OnceLock<EnergyBalanceConfig> = OnceLock::new();

/// Main estimator configuration container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyBalanceConfig {
    /// Windowing and preprocessing
    pub window: WindowConfig,
    /// Low-intake day detection
    pub intake_outliers: IntakeOutlierConfig,
    /// Residual z-score exclusion between fitting passes
    pub outliers: ResidualOutlierConfig,
    /// Coefficient fitting
    pub fitting: FittingConfig,
    /// Confidence classification
    pub confidence: ConfidenceConfig,
    /// Weight and goal-date forecasting
    pub forecast: ForecastConfig,
}

impl EnergyBalanceConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        ENERGY_BALANCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load energy balance config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        config = config.apply_env_overrides()?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_window()?;
        self.validate_outliers()?;
        self.validate_fitting()?;
        self.validate_confidence()?;
        self.validate_forecast()
    }

    fn validate_window(&self) -> Result<(), ConfigError> {
        if self.window.window_days == 0 {
            return Err(ConfigError::ValueOutOfRange("window_days must be > 0"));
        }
        if self.window.min_data_points == 0 {
            return Err(ConfigError::ValueOutOfRange("min_data_points must be > 0"));
        }
        Ok(())
    }

    fn validate_outliers(&self) -> Result<(), ConfigError> {
        let intake = &self.intake_outliers;
        if !(intake.sd_multiplier.is_finite() && intake.sd_multiplier >= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "intake sd_multiplier must be finite and >= 0",
            ));
        }
        if !(intake.absolute_floor_kcal.is_finite() && intake.absolute_floor_kcal >= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "absolute_floor_kcal must be finite and >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&intake.percentile) {
            return Err(ConfigError::ValueOutOfRange(
                "intake percentile must be between 0 and 1",
            ));
        }
        if intake.min_complete_days < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "min_complete_days must be >= 2",
            ));
        }

        let residual = &self.outliers;
        if !(residual.residual_z_threshold.is_finite() && residual.residual_z_threshold > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "residual_z_threshold must be finite and > 0",
            ));
        }
        if !(residual.min_residual_std.is_finite() && residual.min_residual_std >= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "min_residual_std must be finite and >= 0",
            ));
        }
        Ok(())
    }

    fn validate_fitting(&self) -> Result<(), ConfigError> {
        let fitting = &self.fitting;
        fitting
            .algorithm
            .parse::<FitAlgorithm>()
            .map_err(|e| ConfigError::UnknownOption(e.to_string()))?;

        if !(fitting.kcal_per_mass_unit.is_finite() && fitting.kcal_per_mass_unit > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "kcal_per_mass_unit must be finite and > 0",
            ));
        }
        if fitting.min_pairs < MIN_REGRESSION_PAIRS {
            return Err(ConfigError::ValueOutOfRange("min_pairs must be >= 5"));
        }
        if !fitting.alpha.is_consistent() {
            return Err(ConfigError::InvalidRange(
                "alpha bounds must satisfy min <= default <= max",
            ));
        }
        if !fitting.beta.is_consistent() {
            return Err(ConfigError::InvalidRange(
                "beta bounds must satisfy min <= default <= max",
            ));
        }
        if !fitting.gamma.is_consistent() {
            return Err(ConfigError::InvalidRange(
                "gamma bounds must satisfy min <= default <= max",
            ));
        }
        if !(fitting.gradient_learning_rate.is_finite() && fitting.gradient_learning_rate > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "gradient_learning_rate must be finite and > 0",
            ));
        }
        if fitting.gradient_iterations == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "gradient_iterations must be > 0",
            ));
        }
        Ok(())
    }

    fn validate_confidence(&self) -> Result<(), ConfigError> {
        let confidence = &self.confidence;
        if confidence.stable_max_standard_error > confidence.stabilizing_max_standard_error {
            return Err(ConfigError::InvalidRange(
                "stable_max_standard_error must be <= stabilizing_max_standard_error",
            ));
        }
        if !(0.0..1.0).contains(&confidence.stable_min_r_squared) {
            return Err(ConfigError::ValueOutOfRange(
                "stable_min_r_squared must be in [0, 1)",
            ));
        }
        if confidence.score_full_pairs == 0 {
            return Err(ConfigError::ValueOutOfRange("score_full_pairs must be > 0"));
        }
        if !(confidence.score_zero_standard_error.is_finite()
            && confidence.score_zero_standard_error > 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "score_zero_standard_error must be finite and > 0",
            ));
        }
        Ok(())
    }

    fn validate_forecast(&self) -> Result<(), ConfigError> {
        let forecast = &self.forecast;
        if !(forecast.min_margin.is_finite() && forecast.min_margin >= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "forecast min_margin must be finite and >= 0",
            ));
        }
        if !(forecast.interval_z.is_finite() && forecast.interval_z >= 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "forecast interval_z must be finite and >= 0",
            ));
        }
        if !(0.0..1.0).contains(&forecast.goal_band_fraction) {
            return Err(ConfigError::ValueOutOfRange(
                "goal_band_fraction must be in [0, 1)",
            ));
        }
        Ok(())
    }

    /// Parse an environment variable into `target` when it is set
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("TDEE_WINDOW_DAYS", &mut self.window.window_days)?;
        Self::apply_env_var("TDEE_MIN_DATA_POINTS", &mut self.window.min_data_points)?;
        Self::apply_env_var(
            "TDEE_EXCLUDE_INCOMPLETE",
            &mut self.window.exclude_incomplete,
        )?;
        Self::apply_env_var("TDEE_SMOOTHING_WINDOW", &mut self.window.smoothing_window)?;
        Self::apply_env_var(
            "TDEE_OUTLIER_THRESHOLD",
            &mut self.outliers.residual_z_threshold,
        )?;
        Self::apply_env_var("TDEE_FIT_ALGORITHM", &mut self.fitting.algorithm)?;
        Self::apply_env_var(
            "TDEE_INTAKE_THRESHOLD_POLICY",
            &mut self.intake_outliers.policy,
        )?;
        Self::apply_env_var(
            "TDEE_KCAL_PER_MASS_UNIT",
            &mut self.fitting.kcal_per_mass_unit,
        )?;
        Self::apply_env_var("TDEE_ALPHA_MIN", &mut self.fitting.alpha.min)?;
        Self::apply_env_var("TDEE_ALPHA_MAX", &mut self.fitting.alpha.max)?;
        // Keep the fallback inside overridden bounds
        self.fitting.alpha.default = self.fitting.alpha.clamp(self.fitting.alpha.default);

        Ok(self)
    }
}
