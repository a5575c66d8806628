// ABOUTME: Two-pass energy-balance model fitting with residual outlier exclusion
// ABOUTME: Produces the fitted model with standard error, R-squared, and exclusion bookkeeping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Energy-Balance Model
//!
//! Fitting runs twice:
//!
//! 1. Fit on every retained pair and compute residuals
//!    (`predicted_change - actual_change`).
//! 2. Drop pairs with extreme residual z-scores and refit on the rest.
//!
//! When exclusion would leave fewer than `min_pairs` pairs the original set is
//! refit instead and the fallback is recorded on the model, so an estimate is
//! never withheld purely because outliers were numerous.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::algorithms::{Coefficients, FitAlgorithm, FitResult};
use super::regression_pairs::RegressionPair;
use super::residual_outliers::exclude_residual_outliers;
use super::statistics::{bounded_r_squared, total_sum_of_squares};
use crate::config::intelligence::{EnergyBalanceConfig, ModelVariant};

/// A fitted personal energy-balance model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    /// Base burn rate (kcal per mass unit per day)
    pub alpha: f64,
    /// Expenditure per net step (kcal)
    pub beta: f64,
    /// Workout-calorie multiplier
    pub gamma: f64,
    /// Variant that produced the coefficients
    pub variant: ModelVariant,
    /// Energy per unit of body mass used for the fit
    pub kcal_per_mass_unit: f64,
    /// Residual standard error of the daily weight change
    pub standard_error: f64,
    /// Share of weight-change variance explained, in `[0, 1]`
    pub r_squared: f64,
    /// Pairs in the final fit
    pub pairs_used: usize,
    /// Pairs removed by residual screening
    pub pairs_excluded: usize,
    /// Screening would have left too few pairs, so the full set was refit
    pub exclusion_fallback: bool,
}

impl FittedModel {
    /// Coefficient view of the model
    #[must_use]
    pub const fn coefficients(&self) -> Coefficients {
        Coefficients::new(self.alpha, self.beta, self.gamma)
    }

    /// Modeled daily expenditure (kcal)
    #[must_use]
    pub fn expenditure(&self, weight: f64, net_steps: f64, workout_kcal: f64) -> f64 {
        self.coefficients()
            .expenditure(weight, net_steps, workout_kcal)
    }

    /// Predicted daily weight change for an intake and activity level
    #[must_use]
    pub fn predicted_change(
        &self,
        intake_kcal: f64,
        weight: f64,
        net_steps: f64,
        workout_kcal: f64,
    ) -> f64 {
        (intake_kcal - self.expenditure(weight, net_steps, workout_kcal)) / self.kcal_per_mass_unit
    }
}

/// Goodness-of-fit for one coefficient set
#[derive(Debug, Clone, PartialEq)]
pub struct FitMetrics {
    /// `predicted_change - actual_change` per pair
    pub residuals: Vec<f64>,
    /// `sqrt(SSE / max(n - p, 1))`
    pub standard_error: f64,
    /// `1 - SSE / SST` clamped to `[0, 1]`
    pub r_squared: f64,
}

/// Residuals and error metrics of a coefficient set over the pairs
#[must_use]
pub fn evaluate_fit(
    coefficients: &Coefficients,
    pairs: &[RegressionPair],
    parameter_count: usize,
    kcal_per_mass_unit: f64,
) -> FitMetrics {
    let residuals: Vec<f64> = pairs
        .iter()
        .map(|pair| {
            let predicted =
                (pair.intake_kcal - coefficients.pair_expenditure(pair)) / kcal_per_mass_unit;
            predicted - pair.weight_change
        })
        .collect();

    let sse: f64 = residuals.iter().map(|r| r * r).sum();
    let actual: Vec<f64> = pairs.iter().map(|p| p.weight_change).collect();
    let degrees_of_freedom = pairs.len().saturating_sub(parameter_count).max(1);

    FitMetrics {
        standard_error: (sse / degrees_of_freedom as f64).sqrt(),
        r_squared: bounded_r_squared(sse, total_sum_of_squares(&actual)),
        residuals,
    }
}

/// Fit the model with residual outlier exclusion
///
/// Returns `None` when fewer than `min_pairs` pairs are supplied.
#[must_use]
pub fn fit_energy_balance(
    pairs: &[RegressionPair],
    config: &EnergyBalanceConfig,
) -> Option<FittedModel> {
    let min_pairs = config.fitting.min_pairs;
    if pairs.len() < min_pairs {
        return None;
    }

    let algorithm = FitAlgorithm::from_config(&config.fitting);
    let k = config.fitting.kcal_per_mass_unit;
    let fit = |set: &[RegressionPair]| algorithm.fit(set, config.fitting.variant, &config.fitting);

    let first = fit(pairs);
    let first_metrics = evaluate_fit(&first.coefficients, pairs, first.parameter_count, k);
    let screen = exclude_residual_outliers(pairs, &first_metrics.residuals, &config.outliers);

    let (final_fit, final_pairs, excluded, fallback): (FitResult, &[RegressionPair], usize, bool) =
        if screen.excluded == 0 {
            (first, pairs, 0, false)
        } else if screen.kept.len() < min_pairs {
            debug!(
                excluded = screen.excluded,
                remaining = screen.kept.len(),
                min_pairs,
                "Residual exclusion left too few pairs, refitting on the full set"
            );
            // Refitting the full set reproduces the first pass
            (first, pairs, 0, true)
        } else {
            debug!(
                excluded = screen.excluded,
                remaining = screen.kept.len(),
                "Excluded residual outliers before second pass"
            );
            (fit(&screen.kept), screen.kept.as_slice(), screen.excluded, false)
        };

    let metrics = evaluate_fit(
        &final_fit.coefficients,
        final_pairs,
        final_fit.parameter_count,
        k,
    );

    Some(FittedModel {
        alpha: final_fit.coefficients.alpha,
        beta: final_fit.coefficients.beta,
        gamma: final_fit.coefficients.gamma,
        variant: final_fit.variant,
        kcal_per_mass_unit: k,
        standard_error: metrics.standard_error,
        r_squared: metrics.r_squared,
        pairs_used: final_pairs.len(),
        pairs_excluded: excluded,
        exclusion_fallback: fallback,
    })
}
