// ABOUTME: Main library entry point for the adaptive TDEE estimation engine
// ABOUTME: Exposes configuration, logging setup, and the energy-balance intelligence pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Adaptive TDEE
//!
//! Estimates a person's true daily energy expenditure from noisy, self-reported
//! daily observations (body weight, calorie intake, and optionally steps and
//! workout calories). Instead of a population equation, the engine
//! back-calculates a personal energy-balance model by regression and
//! re-estimates it every time it is called.
//!
//! ## Pipeline
//!
//! 1. **Preprocessing**: trailing window, validity and completeness filters, chronological order
//! 2. **Smoothing**: centered rolling mean over body weight
//! 3. **Intake outliers**: flag implausibly low logging days
//! 4. **Regression pairs**: day N intake and activity against the smoothed weight change to day N+1
//! 5. **Two-pass fit**: fit, drop residual outliers, refit, clamp to plausible bounds
//! 6. **Confidence**: discrete level and 0-100 score
//! 7. **History**: the same pipeline replayed at every trailing observation
//!
//! Forecasting and daily projection consume the fitted model.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use adaptive_tdee::config::intelligence::EnergyBalanceConfig;
//! use adaptive_tdee::intelligence::{estimate_tdee, EstimateOutcome, EstimateParams};
//! use adaptive_tdee::models::DailyObservation;
//! use chrono::NaiveDate;
//!
//! # fn main() -> adaptive_tdee::errors::AppResult<()> {
//! let observations: Vec<DailyObservation> = Vec::new();
//! let as_of = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default();
//! let params = EstimateParams::new(180.0, as_of);
//!
//! match estimate_tdee(&observations, &params, EnergyBalanceConfig::global())? {
//!     EstimateOutcome::Estimated(estimate) => println!("TDEE: {:.0}", estimate.estimated_tdee),
//!     EstimateOutcome::InsufficientData(missing) => println!("{missing}"),
//! }
//! # Ok(())
//! # }
//! ```

/// Configuration management for every estimator stage
pub mod config;

/// Energy-balance estimation, forecasting, and projection
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Core error types re-exported from the core crate
pub mod errors {
    pub use adaptive_tdee_core::errors::*;
}

/// Data models re-exported from the core crate
pub mod models {
    pub use adaptive_tdee_core::models::*;
}

/// Domain constants re-exported from the core crate
pub mod constants {
    pub use adaptive_tdee_core::constants::*;
}
