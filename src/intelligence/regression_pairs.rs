// ABOUTME: Regression pair construction linking one day's intake to the next day's weight change
// ABOUTME: Uses smoothed weight for the delta and raw weight, intake, and activity as features
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::DailyObservation;

/// One unit of fitting data
///
/// Day N's intake is metabolized across day N, so day N+1's morning weight
/// reflects day N's energy balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionPair {
    /// Day N
    pub date: NaiveDate,
    /// Raw day N weight
    pub weight: f64,
    /// Day N intake (kcal)
    pub intake_kcal: f64,
    /// Day N steps outside workouts
    pub net_steps: f64,
    /// Day N workout calories (kcal)
    pub workout_kcal: f64,
    /// Smoothed weight change from day N to day N+1
    pub weight_change: f64,
}

impl RegressionPair {
    /// Whether the pair carries any step or workout signal
    #[must_use]
    pub fn has_activity(&self) -> bool {
        self.net_steps > 0.0 || self.workout_kcal > 0.0
    }
}

/// Build one pair per consecutive calendar-day couple
///
/// `smoothed` must be index-aligned with `observations`. A pair is emitted
/// when day N+1 is exactly one day after day N, both weights are positive,
/// day N intake is positive, and day N is not an intake outlier.
#[must_use]
pub fn build_pairs(
    observations: &[DailyObservation],
    smoothed: &[f64],
    outliers: &BTreeSet<NaiveDate>,
) -> Vec<RegressionPair> {
    observations
        .windows(2)
        .zip(smoothed.windows(2))
        .filter_map(|(days, weights)| {
            let (today, tomorrow) = (&days[0], &days[1]);
            let consecutive = today.date.succ_opt() == Some(tomorrow.date);
            let usable = consecutive
                && today.weight > 0.0
                && tomorrow.weight > 0.0
                && today.intake_kcal > 0.0
                && !outliers.contains(&today.date);

            usable.then(|| RegressionPair {
                date: today.date,
                weight: today.weight,
                intake_kcal: today.intake_kcal,
                net_steps: today.net_steps(),
                workout_kcal: today.workout_kcal_or_zero(),
                weight_change: weights[1] - weights[0],
            })
        })
        .collect()
}
