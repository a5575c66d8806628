// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Energy density, coefficient bounds, and pipeline minimums for TDEE estimation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large list. Configuration defaults are built from these values.

/// Energy density of body mass change
pub mod energy {
    /// Kilocalories per pound of body mass change (Wishnofsky rule)
    pub const KCAL_PER_POUND: f64 = 3500.0;
    /// Kilocalories per kilogram of body mass change
    pub const KCAL_PER_KILOGRAM: f64 = 7700.0;
}

/// Plausible bounds for the energy-balance coefficients, expressed per pound
pub mod coefficients {
    /// Lowest plausible base burn rate (kcal per lb per day)
    pub const ALPHA_MIN: f64 = 10.0;
    /// Highest plausible base burn rate (kcal per lb per day)
    pub const ALPHA_MAX: f64 = 20.0;
    /// Fallback base burn rate used when the regression is degenerate
    pub const ALPHA_DEFAULT: f64 = 15.0;

    /// Lowest per-step expenditure (kcal per net step)
    pub const BETA_MIN: f64 = 0.0;
    /// Highest per-step expenditure (kcal per net step)
    pub const BETA_MAX: f64 = 0.1;
    /// Starting per-step expenditure for iterative fits
    pub const BETA_DEFAULT: f64 = 0.04;

    /// Lowest workout-calorie multiplier
    pub const GAMMA_MIN: f64 = 0.0;
    /// Highest workout-calorie multiplier
    pub const GAMMA_MAX: f64 = 1.5;
    /// Starting workout-calorie multiplier for iterative fits
    pub const GAMMA_DEFAULT: f64 = 1.0;
}

/// Hard minimums enforced by the estimation pipeline
pub mod pipeline {
    /// Fewest regression pairs that can ever produce a fit
    pub const MIN_REGRESSION_PAIRS: usize = 5;
    /// Index (zero-based) of the first observation that receives a history point
    pub const HISTORY_START_INDEX: usize = 6;
    /// Minimum complete days before intake outliers are considered
    pub const MIN_COMPLETE_DAYS_FOR_INTAKE_STATS: usize = 3;
}
