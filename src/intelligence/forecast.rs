// ABOUTME: Weight projection and goal-date forecasting from a fitted energy-balance model
// ABOUTME: Applies the plan's constant daily energy balance to the current weight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weight Forecasting
//!
//! Forecasts hold a planned intake and activity level constant. Expenditure is
//! evaluated once at the current weight, and the difference from intake is
//! converted to a fixed mass change per day.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::energy_balance::FittedModel;
use crate::config::intelligence::ForecastConfig;
use crate::errors::{AppError, AppResult};

/// Planned daily intake and activity held constant over the forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityPlan {
    /// Planned intake (kcal/day)
    pub intake_kcal: f64,
    /// Planned steps outside workouts per day
    pub net_steps: f64,
    /// Planned workout calories per day (kcal)
    pub workout_kcal: f64,
}

impl ActivityPlan {
    /// Plan with intake only
    #[must_use]
    pub const fn new(intake_kcal: f64) -> Self {
        Self {
            intake_kcal,
            net_steps: 0.0,
            workout_kcal: 0.0,
        }
    }

    /// Set planned net steps
    #[must_use]
    pub const fn with_net_steps(mut self, net_steps: f64) -> Self {
        self.net_steps = net_steps;
        self
    }

    /// Set planned workout calories
    #[must_use]
    pub const fn with_workout_kcal(mut self, workout_kcal: f64) -> Self {
        self.workout_kcal = workout_kcal;
        self
    }

    fn validate(&self) -> AppResult<()> {
        let fields = [
            ("intake_kcal", self.intake_kcal),
            ("net_steps", self.net_steps),
            ("workout_kcal", self.workout_kcal),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value >= 0.0) {
                return Err(AppError::invalid_input(format!(
                    "Plan {name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Weight projection with an uncertainty band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightForecast {
    /// Forecast horizon in days
    pub days: u32,
    /// Starting weight
    pub start_weight: f64,
    /// Modeled expenditure at the starting weight under the plan (kcal/day)
    pub expenditure: f64,
    /// Weight change per day, negative for a deficit
    pub daily_change: f64,
    /// `start_weight + daily_change x days`
    pub projected_weight: f64,
    /// Half-width of the band
    pub margin: f64,
    /// `projected_weight - margin`
    pub lower_bound: f64,
    /// `projected_weight + margin`
    pub upper_bound: f64,
}

/// Projected date for reaching a target weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalForecast {
    /// Target weight
    pub target_weight: f64,
    /// Days until the target is first reached
    pub days_to_goal: u32,
    /// Most likely date
    pub target_date: NaiveDate,
    /// Optimistic end of the range
    pub earliest_date: NaiveDate,
    /// Conservative end of the range
    pub latest_date: NaiveDate,
}

fn validate_weight(label: &str, weight: f64) -> AppResult<()> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "{label} must be a positive number, got {weight}"
        )))
    }
}

/// Modeled expenditure and the intake surplus (negative for a deficit), both kcal/day
fn daily_balance(model: &FittedModel, weight: f64, plan: &ActivityPlan) -> (f64, f64) {
    let expenditure = model.expenditure(weight, plan.net_steps, plan.workout_kcal);
    (expenditure, plan.intake_kcal - expenditure)
}

/// Project weight `days` ahead under a constant plan
///
/// The band half-width is `max(min_margin, interval_z x standard_error x sqrt(days))`.
///
/// # Errors
///
/// Returns an error if the weight or plan values are invalid
pub fn forecast_weight(
    model: &FittedModel,
    current_weight: f64,
    plan: &ActivityPlan,
    days: u32,
    config: &ForecastConfig,
) -> AppResult<WeightForecast> {
    validate_weight("Current weight", current_weight)?;
    plan.validate()?;

    let (expenditure, surplus) = daily_balance(model, current_weight, plan);
    let daily_change = surplus / model.kcal_per_mass_unit;
    let projected_weight = daily_change.mul_add(f64::from(days), current_weight);

    let spread = config.interval_z * model.standard_error * f64::from(days).sqrt();
    let margin = if spread.is_finite() {
        spread.max(config.min_margin)
    } else {
        config.min_margin
    };

    Ok(WeightForecast {
        days,
        start_weight: current_weight,
        expenditure,
        daily_change,
        projected_weight,
        margin,
        lower_bound: projected_weight - margin,
        upper_bound: projected_weight + margin,
    })
}

/// Project when a target weight is reached under a constant plan
///
/// Returns `Ok(None)` when the plan leaves weight unchanged or moves it away
/// from the target. A current weight already at the target yields zero days.
///
/// # Errors
///
/// Returns an error if either weight or the plan values are invalid, or if the
/// goal lies beyond any representable date
pub fn forecast_goal_date(
    model: &FittedModel,
    current_weight: f64,
    target_weight: f64,
    plan: &ActivityPlan,
    as_of: NaiveDate,
    config: &ForecastConfig,
) -> AppResult<Option<GoalForecast>> {
    validate_weight("Current weight", current_weight)?;
    validate_weight("Target weight", target_weight)?;
    plan.validate()?;

    let gap = target_weight - current_weight;
    if gap.abs() < f64::EPSILON {
        return Ok(Some(GoalForecast {
            target_weight,
            days_to_goal: 0,
            target_date: as_of,
            earliest_date: as_of,
            latest_date: as_of,
        }));
    }

    let (_, surplus) = daily_balance(model, current_weight, plan);
    if surplus.abs() < f64::EPSILON || (surplus > 0.0) != (gap > 0.0) {
        return Ok(None);
    }

    // Kept in kcal so whole-day answers stay exact
    let days = (gap.abs() * model.kcal_per_mass_unit / surplus.abs()).ceil();
    if !(days.is_finite() && days <= f64::from(u32::MAX)) {
        return Err(AppError::out_of_range(format!(
            "Goal is {days} days away under this plan"
        )));
    }

    goal_range(target_weight, days as u32, as_of, config).map(Some)
}

fn goal_range(
    target_weight: f64,
    days: u32,
    as_of: NaiveDate,
    config: &ForecastConfig,
) -> AppResult<GoalForecast> {
    let days_f = f64::from(days);
    let earliest = (days_f * (1.0 - config.goal_band_fraction)).floor().max(0.0) as i64;
    let latest = (days_f * (1.0 + config.goal_band_fraction)).ceil() as i64;

    let offset = |n: i64| {
        as_of
            .checked_add_signed(Duration::days(n))
            .ok_or_else(|| AppError::out_of_range(format!("Date {n} days after {as_of}")))
    };

    Ok(GoalForecast {
        target_weight,
        days_to_goal: days,
        target_date: offset(i64::from(days))?,
        earliest_date: offset(earliest)?,
        latest_date: offset(latest)?,
    })
}
