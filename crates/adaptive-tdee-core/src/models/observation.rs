// ABOUTME: Daily observation model supplied by manual logging and wearable integrations
// ABOUTME: One calendar day of body weight, calorie intake, optional activity, and completeness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of self-reported data
///
/// Weight is expected in a single consistent mass unit across all observations;
/// the energy density used by the fitter must match that unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    /// Calendar day of the observation
    pub date: NaiveDate,
    /// Logged morning body weight
    pub weight: f64,
    /// Logged calorie intake for the day (kcal)
    pub intake_kcal: f64,
    /// Total step count for the day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    /// Steps recorded during workouts (already included in `steps`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_steps: Option<u32>,
    /// Calories expended in logged workouts (kcal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_kcal: Option<f64>,
    /// Whether every meal of the day was logged
    pub complete: bool,
}

impl DailyObservation {
    /// Create a complete observation without activity data
    #[must_use]
    pub const fn new(date: NaiveDate, weight: f64, intake_kcal: f64) -> Self {
        Self {
            date,
            weight,
            intake_kcal,
            steps: None,
            workout_steps: None,
            workout_kcal: None,
            complete: true,
        }
    }

    /// Set the total step count
    #[must_use]
    pub const fn with_steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Set the steps recorded during workouts
    #[must_use]
    pub const fn with_workout_steps(mut self, workout_steps: u32) -> Self {
        self.workout_steps = Some(workout_steps);
        self
    }

    /// Set the workout calorie expenditure
    #[must_use]
    pub const fn with_workout_kcal(mut self, workout_kcal: f64) -> Self {
        self.workout_kcal = Some(workout_kcal);
        self
    }

    /// Mark whether all meals were logged
    #[must_use]
    pub const fn with_complete(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }

    /// Steps outside workouts, so workout movement is not counted twice
    #[must_use]
    pub fn net_steps(&self) -> f64 {
        let total = self.steps.unwrap_or(0);
        let overlap = self.workout_steps.unwrap_or(0);
        f64::from(total.saturating_sub(overlap))
    }

    /// Workout calories, treating a missing or negative entry as zero
    #[must_use]
    pub fn workout_kcal_or_zero(&self) -> f64 {
        self.workout_kcal
            .filter(|kcal| kcal.is_finite())
            .map_or(0.0, |kcal| kcal.max(0.0))
    }

    /// Whether weight and intake are usable for fitting
    #[must_use]
    pub fn has_valid_measurements(&self) -> bool {
        self.weight.is_finite()
            && self.weight > 0.0
            && self.intake_kcal.is_finite()
            && self.intake_kcal > 0.0
    }
}
