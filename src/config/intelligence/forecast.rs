// ABOUTME: Weight forecasting and goal-date projection configuration
// ABOUTME: Margin floor, interval multiplier, and goal band width
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Forecast configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Smallest margin reported around a projected weight
    pub min_margin: f64,
    /// Interval multiplier applied to `standard_error x sqrt(days)`
    pub interval_z: f64,
    /// Relative width of the goal-date range (0.15 = plus or minus 15%)
    pub goal_band_fraction: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_margin: 1.0,
            interval_z: 1.96,
            goal_band_fraction: 0.15,
        }
    }
}
