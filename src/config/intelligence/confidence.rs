// ABOUTME: Confidence classification thresholds for fitted energy-balance models
// ABOUTME: Standard error, R-squared, and sample-size cutoffs plus score scaling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Confidence classifier configuration
///
/// A fit is `stable` when every stable threshold holds, `stabilizing` when
/// either stabilizing threshold holds, and `unstable` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Standard error must be strictly below this for `stable`
    pub stable_max_standard_error: f64,
    /// R-squared must be strictly above this for `stable`
    pub stable_min_r_squared: f64,
    /// Pairs used must be strictly above this for `stable`
    pub stable_min_pairs: usize,
    /// Standard error strictly below this qualifies for `stabilizing`
    pub stabilizing_max_standard_error: f64,
    /// Pairs used strictly above this qualify for `stabilizing`
    pub stabilizing_min_pairs: usize,
    /// Pair count at which the sample-size half of the score saturates
    pub score_full_pairs: usize,
    /// Standard error at which the precision half of the score reaches zero
    pub score_zero_standard_error: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            stable_max_standard_error: 0.35,
            stable_min_r_squared: 0.1,
            stable_min_pairs: 14,
            stabilizing_max_standard_error: 0.6,
            stabilizing_min_pairs: 10,
            score_full_pairs: 28,
            score_zero_standard_error: 1.0,
        }
    }
}
