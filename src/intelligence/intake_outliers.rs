// ABOUTME: Low-intake day detection for under-logged food diaries
// ABOUTME: Combines a trimmed mean/SD threshold with a low percentile under an explicit policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intake Outlier Detection
//!
//! A single under-logged day tells the regression "ate less than recorded yet
//! lost no more weight than expected", which biases the burn rate high. Days
//! flagged here never become regression pairs.
//!
//! Two thresholds are computed from *complete* days only:
//!
//! - **Deviation threshold**: `mean - k x SD` over intakes at or above the
//!   absolute floor, so clearly broken days cannot drag the mean down.
//! - **Percentile threshold**: a low percentile of complete-day intake.
//!
//! [`IntakeThresholdPolicy`] decides which one wins. Any day below the combined
//! threshold, or below the absolute floor, is flagged.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use super::statistics::{mean, percentile, sample_std_dev};
use crate::config::intelligence::{IntakeOutlierConfig, IntakeThresholdPolicy};
use crate::models::DailyObservation;

/// Thresholds computed for one detection run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntakeThresholds {
    /// `mean - k x SD` over the trimmed complete-day intakes
    pub deviation_threshold: f64,
    /// Configured low percentile of complete-day intakes
    pub percentile_threshold: f64,
    /// Result of applying the policy to the two thresholds
    pub combined: f64,
    /// Policy that produced `combined`
    pub policy: IntakeThresholdPolicy,
}

/// Compute thresholds from the complete days, `None` when there are too few
#[must_use]
pub fn intake_thresholds(
    observations: &[DailyObservation],
    config: &IntakeOutlierConfig,
) -> Option<IntakeThresholds> {
    let complete: Vec<f64> = observations
        .iter()
        .filter(|obs| obs.complete && obs.intake_kcal.is_finite())
        .map(|obs| obs.intake_kcal)
        .collect();

    if complete.len() < config.min_complete_days {
        return None;
    }

    let trimmed: Vec<f64> = complete
        .iter()
        .copied()
        .filter(|kcal| *kcal >= config.absolute_floor_kcal)
        .collect();
    let basis = if trimmed.len() >= 2 {
        &trimmed
    } else {
        &complete
    };

    let avg = mean(basis)?;
    let deviation_threshold = config.sd_multiplier.mul_add(-sample_std_dev(basis), avg);
    let percentile_threshold = percentile(&complete, config.percentile)?;

    Some(IntakeThresholds {
        deviation_threshold,
        percentile_threshold,
        combined: config
            .policy
            .combine(deviation_threshold, percentile_threshold),
        policy: config.policy,
    })
}

/// Flag the dates whose logged intake is anomalously low
///
/// Returns an empty set when fewer than `min_complete_days` complete days are
/// available, so sparse histories are never over-filtered.
#[must_use]
pub fn detect_intake_outliers(
    observations: &[DailyObservation],
    config: &IntakeOutlierConfig,
) -> BTreeSet<NaiveDate> {
    let Some(thresholds) = intake_thresholds(observations, config) else {
        debug!(
            observations = observations.len(),
            required = config.min_complete_days,
            "Too few complete days for intake outlier screening"
        );
        return BTreeSet::new();
    };

    let flagged: BTreeSet<NaiveDate> = observations
        .iter()
        .filter(|obs| {
            obs.intake_kcal < thresholds.combined || obs.intake_kcal < config.absolute_floor_kcal
        })
        .map(|obs| obs.date)
        .collect();

    if !flagged.is_empty() {
        debug!(
            flagged = flagged.len(),
            threshold = thresholds.combined,
            deviation_threshold = thresholds.deviation_threshold,
            percentile_threshold = thresholds.percentile_threshold,
            policy = %thresholds.policy,
            "Flagged low-intake days"
        );
    }

    flagged
}
