// ABOUTME: Shared test utilities and observation fixtures for integration tests
// ABOUTME: Provides quiet logging setup and deterministic daily observation series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::cast_possible_wrap
)]
//! Shared test utilities for `adaptive_tdee`
//!
//! Fixtures are deterministic so assertions never depend on random draws.

use std::env;
use std::sync::Once;

use adaptive_tdee::models::DailyObservation;
use chrono::{Duration, NaiveDate};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; tests stay quiet by default
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            Ok("WARN" | "ERROR") | _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// First day of every fixture series
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Fixture day `offset` days after the start
pub fn day(offset: i64) -> NaiveDate {
    start_date() + Duration::days(offset)
}

/// Consecutive days with weight moving linearly from `start_weight` to `end_weight`
pub fn linear_series(
    days: usize,
    start_weight: f64,
    end_weight: f64,
    intake_kcal: f64,
) -> Vec<DailyObservation> {
    let step = if days > 1 {
        (end_weight - start_weight) / (days - 1) as f64
    } else {
        0.0
    };
    (0..days)
        .map(|i| {
            DailyObservation::new(
                day(i as i64),
                step.mul_add(i as f64, start_weight),
                intake_kcal,
            )
        })
        .collect()
}

/// The 21-day series: 200.0 down to 194.9 at 2200 kcal/day, no activity
pub fn worked_example_series() -> Vec<DailyObservation> {
    linear_series(21, 200.0, 194.9, 2200.0)
}

/// Series generated from a known energy balance with deterministic noise
///
/// Weight evolves as `(intake - expenditure) / 3500` with `alpha = 14.5`,
/// `beta = 0.035`, and `gamma = 0.9`; each recorded weight carries a small
/// periodic water-weight wobble.
pub fn simulated_active_series(days: usize) -> Vec<DailyObservation> {
    let mut weight = 185.0;
    (0..days)
        .map(|i| {
            let x = i as f64;
            let steps = 7_000 + ((i * 1_373) % 5_000) as u32;
            let workout_steps = if i % 3 == 0 { 2_500 } else { 0 };
            let workout_kcal = if i % 3 == 0 { 350.0 } else { 0.0 };
            let intake = 2_300.0 + 250.0 * (x * 1.7).sin();

            let net_steps = f64::from(steps - workout_steps);
            let expenditure = 0.9f64.mul_add(workout_kcal, 0.035f64.mul_add(net_steps, 14.5 * weight));
            let recorded = 0.15f64.mul_add((x * 2.3).sin(), weight);

            let obs = DailyObservation::new(day(i as i64), recorded, intake)
                .with_steps(steps)
                .with_workout_steps(workout_steps)
                .with_workout_kcal(workout_kcal);
            weight += (intake - expenditure) / 3_500.0;
            obs
        })
        .collect()
}

/// Date of the last observation in a series
pub fn last_date(observations: &[DailyObservation]) -> NaiveDate {
    observations.iter().map(|o| o.date).max().unwrap()
}
