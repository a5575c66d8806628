// ABOUTME: Intelligence module for adaptive energy-expenditure estimation
// ABOUTME: Re-exports the pipeline stages, estimator, forecaster, and daily projector
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Personal energy-balance modeling from daily weight, intake, and activity
//! logs. Stages are leaf-first: each module only depends on the ones above it
//! in this list, except the estimator and history builder which drive each
//! other.

/// Algorithm selection for coefficient fitting
pub mod algorithms;
/// Confidence level and score
pub mod confidence;
/// Today's expenditure projection
pub mod daily_projection;
/// Two-pass model fitting and fit metrics
pub mod energy_balance;
/// Estimation entry point and result types
pub mod estimator;
/// Weight and goal-date forecasting
pub mod forecast;
/// Rolling burn-rate history
pub mod history;
/// Low-intake day detection
pub mod intake_outliers;
/// Windowing and canonical ordering of observations
pub mod preprocessing;
/// Day-N to day-N+1 regression pairs
pub mod regression_pairs;
/// Residual z-score exclusion
pub mod residual_outliers;
/// Weight smoothing
pub mod smoothing;
/// Shared descriptive statistics
pub mod statistics;

pub use algorithms::{Coefficients, FitAlgorithm};
pub use confidence::{assess_model, classify_confidence, confidence_score, ConfidenceLevel};
pub use daily_projection::{project_daily_expenditure, DailyActivity, DailyProjection};
pub use energy_balance::{evaluate_fit, fit_energy_balance, FitMetrics, FittedModel};
pub use estimator::{
    estimate_tdee, Estimate, EstimateOutcome, EstimateParams, InsufficientData,
    InsufficientDataReason,
};
pub use forecast::{
    forecast_goal_date, forecast_weight, ActivityPlan, GoalForecast, WeightForecast,
};
pub use history::{build_history, HistoryPoint};
pub use intake_outliers::{detect_intake_outliers, intake_thresholds, IntakeThresholds};
pub use preprocessing::{preprocess, valid_observations};
pub use regression_pairs::{build_pairs, RegressionPair};
pub use residual_outliers::{exclude_residual_outliers, ResidualScreen};
pub use smoothing::centered_rolling_mean;
