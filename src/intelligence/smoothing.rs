// ABOUTME: Centered rolling-mean smoother for daily body weight
// ABOUTME: Damps day-to-day water and glycogen noise before weight change is measured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Centered rolling mean over a weight series
///
/// Each output averages the positive readings in
/// `[i - width/2, i + width/2]`, clamped to the series bounds. An index with
/// no positive neighbour keeps its raw value. Widths below 2 leave the series
/// unchanged.
///
/// Only weight change is computed from the smoothed series; regression
/// features always use raw readings.
#[must_use]
pub fn centered_rolling_mean(weights: &[f64], width: usize) -> Vec<f64> {
    if width < 2 || weights.is_empty() {
        return weights.to_vec();
    }

    let half = width / 2;
    let last = weights.len() - 1;

    (0..weights.len())
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half).min(last);
            let (sum, count) = weights[start..=end]
                .iter()
                .filter(|w| w.is_finite() && **w > 0.0)
                .fold((0.0, 0_usize), |(sum, count), w| (sum + w, count + 1));

            if count == 0 {
                weights[i]
            } else {
                sum / count as f64
            }
        })
        .collect()
}
