// ABOUTME: Observation preprocessing: trailing window, validity filters, and canonical ordering
// ABOUTME: Produces a deterministic chronological series regardless of input order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Observation Preprocessing
//!
//! Raw observations arrive unordered and possibly duplicated. Preprocessing
//! keeps only entries that can contribute to a fit and returns them in a
//! canonical chronological order, so two permutations of the same input always
//! produce the same series.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::config::intelligence::WindowConfig;
use crate::models::DailyObservation;

/// Filter observations to the trailing window ending at `as_of`
///
/// Keeps entries with `as_of - window_days < date <= as_of`, positive finite
/// weight and intake, and (when `exclude_incomplete`) fully logged days.
#[must_use]
pub fn preprocess(
    observations: &[DailyObservation],
    config: &WindowConfig,
    as_of: NaiveDate,
) -> Vec<DailyObservation> {
    let window_start = as_of - Duration::days(i64::from(config.window_days));

    let filtered: Vec<DailyObservation> =
        valid_observations(observations, config.exclude_incomplete, as_of)
            .into_iter()
            .filter(|obs| obs.date > window_start)
            .collect();

    debug!(
        input = observations.len(),
        retained = filtered.len(),
        window_days = config.window_days,
        %as_of,
        "Preprocessed observation window"
    );

    filtered
}

/// Apply the validity filters without restricting to a window
///
/// Used by the history builder, which replays the pipeline at every
/// valid observation date up to `as_of`.
#[must_use]
pub fn valid_observations(
    observations: &[DailyObservation],
    exclude_incomplete: bool,
    as_of: NaiveDate,
) -> Vec<DailyObservation> {
    let mut kept: Vec<DailyObservation> = observations
        .iter()
        .filter(|obs| obs.date <= as_of)
        .filter(|obs| obs.has_valid_measurements())
        .filter(|obs| !exclude_incomplete || obs.complete)
        .cloned()
        .collect();

    kept.sort_by(canonical_order);
    // Same-date entries collapse to the first under the canonical order
    kept.dedup_by(|later, earlier| later.date == earlier.date);
    kept
}

/// Total order over observations: date first, then every measured field
fn canonical_order(a: &DailyObservation, b: &DailyObservation) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.weight.total_cmp(&b.weight))
        .then_with(|| a.intake_kcal.total_cmp(&b.intake_kcal))
        .then_with(|| a.steps.cmp(&b.steps))
        .then_with(|| a.workout_steps.cmp(&b.workout_steps))
        .then_with(|| {
            a.workout_kcal_or_zero()
                .total_cmp(&b.workout_kcal_or_zero())
        })
        .then_with(|| a.workout_kcal.is_some().cmp(&b.workout_kcal.is_some()))
        .then_with(|| a.complete.cmp(&b.complete))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap_or_default()
    }

    #[test]
    fn test_canonical_order_breaks_same_date_ties_by_weight() {
        let a = DailyObservation::new(day(3), 180.0, 2000.0);
        let b = DailyObservation::new(day(3), 179.0, 2500.0);
        assert_eq!(canonical_order(&a, &b), Ordering::Greater);
        assert_eq!(canonical_order(&b, &a), Ordering::Less);
        assert_eq!(canonical_order(&a, &a), Ordering::Equal);
    }

    #[test]
    fn test_duplicates_collapse_to_first_in_order() {
        let heavier = DailyObservation::new(day(3), 181.0, 2000.0);
        let lighter = DailyObservation::new(day(3), 180.0, 2000.0);
        let kept = valid_observations(&[heavier, lighter.clone()], true, day(10));
        assert_eq!(kept, vec![lighter]);
    }
}
