// ABOUTME: Today's projected expenditure from the fitted model and today's logged activity
// ABOUTME: Reports the deviation from average expenditure for calorie-target adjustment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::energy_balance::FittedModel;
use crate::errors::{AppError, AppResult};
use crate::models::DailyObservation;

/// Activity logged so far today
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    /// Total steps
    pub steps: u32,
    /// Steps recorded during workouts (included in `steps`)
    pub workout_steps: u32,
    /// Workout calories (kcal)
    pub workout_kcal: f64,
}

impl DailyActivity {
    /// Steps outside workouts
    #[must_use]
    pub fn net_steps(&self) -> f64 {
        f64::from(self.steps.saturating_sub(self.workout_steps))
    }
}

impl From<&DailyObservation> for DailyActivity {
    fn from(obs: &DailyObservation) -> Self {
        Self {
            steps: obs.steps.unwrap_or(0),
            workout_steps: obs.workout_steps.unwrap_or(0),
            workout_kcal: obs.workout_kcal_or_zero(),
        }
    }
}

/// Today's expenditure against the person's average
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyProjection {
    /// Modeled expenditure for today (kcal)
    pub projected_tdee: f64,
    /// Reference average expenditure (kcal)
    pub average_tdee: f64,
    /// `projected_tdee - average_tdee`
    pub deviation_kcal: f64,
    /// Deviation relative to the average, in percent
    pub deviation_percent: f64,
}

/// Project today's expenditure and its deviation from `average_tdee`
///
/// Consumers raise or lower today's calorie target by `deviation_kcal`.
///
/// # Errors
///
/// Returns an error if the current weight is not a positive finite number
/// or the average expenditure is not finite
pub fn project_daily_expenditure(
    model: &FittedModel,
    current_weight: f64,
    today: &DailyActivity,
    average_tdee: f64,
) -> AppResult<DailyProjection> {
    if !(current_weight.is_finite() && current_weight > 0.0) {
        return Err(AppError::invalid_input(format!(
            "Current weight must be a positive number, got {current_weight}"
        )));
    }
    if !average_tdee.is_finite() {
        return Err(AppError::invalid_input("Average TDEE must be finite"));
    }

    let workout_kcal = if today.workout_kcal.is_finite() {
        today.workout_kcal.max(0.0)
    } else {
        0.0
    };
    let projected_tdee = model.expenditure(current_weight, today.net_steps(), workout_kcal);
    let deviation_kcal = projected_tdee - average_tdee;
    let deviation_percent = if average_tdee > 0.0 {
        deviation_kcal / average_tdee * 100.0
    } else {
        0.0
    };

    Ok(DailyProjection {
        projected_tdee,
        average_tdee,
        deviation_kcal,
        deviation_percent,
    })
}
