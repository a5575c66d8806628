// ABOUTME: Observation window configuration for preprocessing and smoothing
// ABOUTME: Trailing window length, minimum data points, completeness filter, smoothing width
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Default trailing window (days)
pub const DEFAULT_WINDOW_DAYS: u32 = 28;
/// Default minimum observations surviving filtering
pub const DEFAULT_MIN_DATA_POINTS: usize = 7;
/// Default centered smoothing width (days)
pub const DEFAULT_SMOOTHING_WINDOW: usize = 7;

/// Windowing and preprocessing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Size of the trailing window in days, ending at the reference date
    pub window_days: u32,
    /// Minimum observations that must survive filtering
    pub min_data_points: usize,
    /// Drop days whose meals were not all logged
    pub exclude_incomplete: bool,
    /// Width of the centered weight-smoothing window
    pub smoothing_window: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            min_data_points: DEFAULT_MIN_DATA_POINTS,
            exclude_incomplete: true,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
        }
    }
}
