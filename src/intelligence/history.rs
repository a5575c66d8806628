// ABOUTME: Rolling burn-rate history replaying the full pipeline at each trailing observation
// ABOUTME: Shows how the personal coefficient and its confidence evolved as data accumulated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use adaptive_tdee_core::constants::pipeline::HISTORY_START_INDEX;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::confidence::confidence_score;
use super::estimator::fit_window;
use super::preprocessing::valid_observations;
use crate::config::intelligence::EnergyBalanceConfig;
use crate::models::DailyObservation;

/// Burn rate as it would have been estimated on one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Reference date of the refit
    pub date: NaiveDate,
    /// Fitted base burn rate
    pub alpha: f64,
    /// Confidence score of the refit
    pub confidence_score: u8,
}

/// Replay the estimator at every valid observation from the seventh onward
///
/// Dates whose refit lacks data are skipped. Cost grows with
/// `days x window`; callers cache if they need to.
#[must_use]
pub fn build_history(
    observations: &[DailyObservation],
    config: &EnergyBalanceConfig,
    as_of: NaiveDate,
) -> Vec<HistoryPoint> {
    let valid = valid_observations(observations, config.window.exclude_incomplete, as_of);

    valid
        .iter()
        .skip(HISTORY_START_INDEX)
        .filter_map(|obs| {
            fit_window(&valid, config, obs.date)
                .ok()
                .map(|fit| HistoryPoint {
                    date: obs.date,
                    alpha: fit.model.alpha,
                    confidence_score: confidence_score(
                        fit.model.standard_error,
                        fit.model.pairs_used,
                        &config.confidence,
                    ),
                })
        })
        .collect()
}
