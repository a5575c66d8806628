// ABOUTME: Descriptive statistics shared by the outlier screens and the fit metrics
// ABOUTME: Mean, sample standard deviation, interpolated percentile, and bounded R-squared
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Arithmetic mean, `None` for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator)
///
/// Returns 0.0 for fewer than two values so callers can treat a single
/// observation as perfectly consistent.
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let Some(avg) = mean(values) else {
        return 0.0;
    };
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq = values
        .iter()
        .map(|v| {
            let d = v - avg;
            d * d
        })
        .sum::<f64>();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Percentile with linear interpolation between closest ranks
///
/// `fraction` is in `[0, 1]`; values outside are clamped. Non-finite inputs
/// sort last and therefore only influence the top of the distribution.
#[must_use]
pub fn percentile(values: &[f64], fraction: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = fraction.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    Some(weight.mul_add(sorted[upper] - sorted[lower], sorted[lower]))
}

/// Coefficient of determination `1 - SSE/SST`, clamped to `[0, 1]`
///
/// A series with no variance (SST = 0) has nothing to explain and yields 0.
#[must_use]
pub fn bounded_r_squared(sse: f64, sst: f64) -> f64 {
    if sst <= f64::EPSILON || !sst.is_finite() || !sse.is_finite() {
        return 0.0;
    }
    (1.0 - sse / sst).clamp(0.0, 1.0)
}

/// Sum of squared deviations from the mean
#[must_use]
pub fn total_sum_of_squares(values: &[f64]) -> f64 {
    mean(values).map_or(0.0, |avg| {
        values
            .iter()
            .map(|v| {
                let d = v - avg;
                d * d
            })
            .sum()
    })
}
