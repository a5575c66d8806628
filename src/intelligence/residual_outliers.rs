// ABOUTME: Residual z-score exclusion between the two fitting passes
// ABOUTME: Drops pairs the first-pass model explains poorly unless residuals are already tight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::regression_pairs::RegressionPair;
use super::statistics::{mean, sample_std_dev};
use crate::config::intelligence::ResidualOutlierConfig;

/// Outcome of residual screening
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualScreen {
    /// Pairs whose residual z-score is within the threshold
    pub kept: Vec<RegressionPair>,
    /// Number of pairs dropped
    pub excluded: usize,
    /// Residual spread was below the minimum, nothing was screened
    pub skipped: bool,
}

/// Drop pairs whose residual z-score exceeds the configured threshold
///
/// `residuals` must be index-aligned with `pairs`. The kept set is never
/// larger than the input.
#[must_use]
pub fn exclude_residual_outliers(
    pairs: &[RegressionPair],
    residuals: &[f64],
    config: &ResidualOutlierConfig,
) -> ResidualScreen {
    let spread = sample_std_dev(residuals);
    let center = mean(residuals).unwrap_or(0.0);

    if !spread.is_finite() || spread < config.min_residual_std {
        return ResidualScreen {
            kept: pairs.to_vec(),
            excluded: 0,
            skipped: true,
        };
    }

    let kept: Vec<RegressionPair> = pairs
        .iter()
        .zip(residuals)
        .filter(|(_, residual)| ((*residual - center) / spread).abs() <= config.residual_z_threshold)
        .map(|(pair, _)| pair.clone())
        .collect();

    ResidualScreen {
        excluded: pairs.len() - kept.len(),
        kept,
        skipped: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn pairs(n: u32) -> Vec<RegressionPair> {
        (1..=n)
            .map(|d| RegressionPair {
                date: NaiveDate::from_ymd_opt(2025, 1, d).unwrap_or_default(),
                weight: 180.0,
                intake_kcal: 2_500.0,
                net_steps: 0.0,
                workout_kcal: 0.0,
                weight_change: -0.1,
            })
            .collect()
    }

    #[test]
    fn test_tight_residuals_skip_screening() {
        let input = pairs(6);
        let residuals = vec![0.01; 6];
        let screen = exclude_residual_outliers(&input, &residuals, &ResidualOutlierConfig::default());
        assert!(screen.skipped);
        assert_eq!(screen.kept.len(), 6);
        assert_eq!(screen.excluded, 0);
    }

    #[test]
    fn test_extreme_residual_is_dropped() {
        let input = pairs(12);
        let mut residuals = vec![0.02, -0.02, 0.01, -0.01, 0.0, 0.03, -0.03, 0.02, -0.02, 0.01, -0.01];
        residuals.push(2.0);
        let screen = exclude_residual_outliers(&input, &residuals, &ResidualOutlierConfig::default());
        assert!(!screen.skipped);
        assert_eq!(screen.excluded, 1);
        let dropped = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap_or_default();
        assert!(screen.kept.iter().all(|p| p.date != dropped));
    }
}
