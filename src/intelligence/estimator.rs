// ABOUTME: Adaptive TDEE estimation pipeline from raw daily observations to a scored estimate
// ABOUTME: Orchestrates preprocessing, smoothing, outlier screens, two-pass fitting, and history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! TDEE Estimator
//!
//! Stateless entry point of the engine. Every call recomputes the full
//! pipeline from the supplied observations:
//!
//! ```text
//! observations -> preprocess -> smooth -> intake outliers -> pairs
//!              -> fit -> residual exclusion -> refit -> confidence
//! ```
//!
//! Too little data is reported as [`EstimateOutcome::InsufficientData`] rather
//! than as an error or an unreliable number.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::confidence::{assess_model, ConfidenceLevel};
use super::energy_balance::{fit_energy_balance, FittedModel};
use super::history::{build_history, HistoryPoint};
use super::intake_outliers::detect_intake_outliers;
use super::preprocessing::preprocess;
use super::regression_pairs::build_pairs;
use super::smoothing::centered_rolling_mean;
use super::statistics::mean;
use crate::config::intelligence::EnergyBalanceConfig;
use crate::errors::{AppError, AppResult};
use crate::models::DailyObservation;

/// Caller-supplied inputs beyond the observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateParams {
    /// Current body weight used to express the estimate in kcal
    pub current_weight: f64,
    /// Reference date; the window ends on this day inclusive
    pub as_of: NaiveDate,
}

impl EstimateParams {
    /// Create estimate parameters
    #[must_use]
    pub const fn new(current_weight: f64, as_of: NaiveDate) -> Self {
        Self {
            current_weight,
            as_of,
        }
    }
}

/// Why no estimate could be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsufficientDataReason {
    /// Too few valid observations in the window
    TooFewObservations,
    /// Too few regression pairs after pairing
    TooFewPairs,
}

/// Insufficient-data report with the shortfall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsufficientData {
    /// Which minimum was not met
    pub reason: InsufficientDataReason,
    /// Count available
    pub available: usize,
    /// Count required
    pub required: usize,
}

impl fmt::Display for InsufficientData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.reason {
            InsufficientDataReason::TooFewObservations => "observations",
            InsufficientDataReason::TooFewPairs => "regression pairs",
        };
        write!(
            f,
            "Insufficient data: {} {what} available, {} required",
            self.available, self.required
        )
    }
}

/// Externally visible estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Fitted coefficients and error metrics
    #[serde(flatten)]
    pub model: FittedModel,
    /// Expenditure at the current weight and average window activity (kcal/day)
    pub estimated_tdee: f64,
    /// Discrete trust level
    pub confidence: ConfidenceLevel,
    /// Numeric trust in `0..=100`
    pub confidence_score: u8,
    /// Observations in the window after filtering
    pub observations_used: usize,
    /// Regression pairs before residual exclusion
    pub pairs_before_exclusion: usize,
    /// Configured window size in days
    pub window_days: u32,
    /// Reference date of the estimate
    pub as_of: NaiveDate,
    /// Burn-rate trajectory, oldest first
    pub history: Vec<HistoryPoint>,
}

impl Estimate {
    /// Base burn rate (kcal per mass unit per day)
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.model.alpha
    }

    /// Expenditure per net step (kcal)
    #[must_use]
    pub const fn beta(&self) -> f64 {
        self.model.beta
    }

    /// Workout-calorie multiplier
    #[must_use]
    pub const fn gamma(&self) -> f64 {
        self.model.gamma
    }

    /// Residual standard error of the final fit
    #[must_use]
    pub const fn standard_error(&self) -> f64 {
        self.model.standard_error
    }

    /// R-squared of the final fit
    #[must_use]
    pub const fn r_squared(&self) -> f64 {
        self.model.r_squared
    }

    /// Regression pairs after residual exclusion
    #[must_use]
    pub const fn pairs_after_exclusion(&self) -> usize {
        self.model.pairs_used
    }
}

/// Result of an estimation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EstimateOutcome {
    /// A model was fitted
    Estimated(Box<Estimate>),
    /// Minimum data requirements were not met
    InsufficientData(InsufficientData),
}

impl EstimateOutcome {
    /// The estimate, if one was produced
    #[must_use]
    pub fn estimate(&self) -> Option<&Estimate> {
        match self {
            Self::Estimated(estimate) => Some(estimate.as_ref()),
            Self::InsufficientData(_) => None,
        }
    }

    /// The shortfall, if no estimate was produced
    #[must_use]
    pub const fn insufficient_data(&self) -> Option<&InsufficientData> {
        match self {
            Self::Estimated(_) => None,
            Self::InsufficientData(missing) => Some(missing),
        }
    }
}

/// A model fitted over one trailing window
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowFit {
    pub observations: Vec<DailyObservation>,
    pub pairs_before_exclusion: usize,
    pub model: FittedModel,
}

/// Run the pipeline for the window ending at `as_of`
pub(crate) fn fit_window(
    observations: &[DailyObservation],
    config: &EnergyBalanceConfig,
    as_of: NaiveDate,
) -> Result<WindowFit, InsufficientData> {
    let window = preprocess(observations, &config.window, as_of);
    if window.len() < config.window.min_data_points {
        return Err(InsufficientData {
            reason: InsufficientDataReason::TooFewObservations,
            available: window.len(),
            required: config.window.min_data_points,
        });
    }

    let weights: Vec<f64> = window.iter().map(|obs| obs.weight).collect();
    let smoothed = centered_rolling_mean(&weights, config.window.smoothing_window);
    let outliers = detect_intake_outliers(&window, &config.intake_outliers);
    let pairs = build_pairs(&window, &smoothed, &outliers);

    let insufficient_pairs = InsufficientData {
        reason: InsufficientDataReason::TooFewPairs,
        available: pairs.len(),
        required: config.fitting.min_pairs,
    };
    let model = fit_energy_balance(&pairs, config).ok_or(insufficient_pairs)?;

    Ok(WindowFit {
        pairs_before_exclusion: pairs.len(),
        observations: window,
        model,
    })
}

/// Expenditure at the current weight plus average window activity
fn estimated_tdee(fit: &WindowFit, current_weight: f64) -> f64 {
    let net_steps: Vec<f64> = fit.observations.iter().map(DailyObservation::net_steps).collect();
    let workout: Vec<f64> = fit
        .observations
        .iter()
        .map(DailyObservation::workout_kcal_or_zero)
        .collect();

    fit.model.expenditure(
        current_weight,
        mean(&net_steps).unwrap_or(0.0),
        mean(&workout).unwrap_or(0.0),
    )
}

/// Estimate TDEE from daily observations
///
/// # Errors
///
/// Returns an error if the current weight is not a positive finite number or
/// the configuration fails validation. Too little data is not an error.
pub fn estimate_tdee(
    observations: &[DailyObservation],
    params: &EstimateParams,
    config: &EnergyBalanceConfig,
) -> AppResult<EstimateOutcome> {
    if !(params.current_weight.is_finite() && params.current_weight > 0.0) {
        return Err(AppError::invalid_input(format!(
            "Current weight must be a positive number, got {}",
            params.current_weight
        )));
    }
    config.validate()?;

    let fit = match fit_window(observations, config, params.as_of) {
        Ok(fit) => fit,
        Err(missing) => {
            debug!(
                reason = ?missing.reason,
                available = missing.available,
                required = missing.required,
                as_of = %params.as_of,
                "Insufficient data for TDEE estimate"
            );
            return Ok(EstimateOutcome::InsufficientData(missing));
        }
    };

    let (confidence, confidence_score) = assess_model(&fit.model, &config.confidence);
    let tdee = estimated_tdee(&fit, params.current_weight);
    let history = build_history(observations, config, params.as_of);

    debug!(
        alpha = fit.model.alpha,
        tdee,
        confidence = %confidence,
        confidence_score,
        pairs = fit.model.pairs_used,
        excluded = fit.model.pairs_excluded,
        history_points = history.len(),
        "Estimated TDEE"
    );

    Ok(EstimateOutcome::Estimated(Box::new(Estimate {
        estimated_tdee: tdee,
        confidence,
        confidence_score,
        observations_used: fit.observations.len(),
        pairs_before_exclusion: fit.pairs_before_exclusion,
        window_days: config.window.window_days,
        as_of: params.as_of,
        history,
        model: fit.model,
    })))
}
