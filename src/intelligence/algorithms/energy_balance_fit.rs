// ABOUTME: Energy-balance coefficient fitting with closed-form and projected-gradient algorithms
// ABOUTME: Regresses implied expenditure on weight, net steps, and workout calories within bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Energy-Balance Fitting Algorithms
//!
//! Each regression pair implies an expenditure for day N:
//!
//! ```text
//! implied_expenditure = intake - K x weight_change
//! ```
//!
//! where `K` is the energy stored per unit of body mass. The model explains it as
//!
//! ```text
//! expenditure = alpha x weight + beta x net_steps + gamma x workout_kcal
//! ```
//!
//! The single-parameter variant is the same model with `beta` and `gamma`
//! fixed at zero. Activity columns that carry no signal in the pair set are
//! left out of the solve and their coefficients stay at zero.

use std::str::FromStr;

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::intelligence::{FittingConfig, ModelVariant};
use crate::errors::AppError;
use crate::intelligence::regression_pairs::RegressionPair;

/// Relative singular-value cutoff below which the normal equations are singular
const SINGULAR_TOLERANCE: f64 = 1e-10;

/// Fitting algorithm selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FitAlgorithm {
    /// Ordinary least squares on the implied expenditure
    ///
    /// Single parameter: `alpha = sum(w x y) / sum(w^2)`.
    /// Multi parameter: normal equations over the active columns, solved by
    /// SVD, followed by one clamp to the configured bounds.
    ///
    /// Pros: exact optimum, no tuning
    /// Cons: clamping after the solve can leave other coefficients suboptimal
    #[default]
    ClosedForm,

    /// Projected gradient descent
    ///
    /// Gradient steps on the scaled squared error, with every iteration's
    /// coefficients clamped to bounds before continuing.
    ///
    /// Pros: bound-aware at every step
    /// Cons: depends on learning rate and iteration budget
    ProjectedGradient {
        /// Step size on the scaled problem
        learning_rate: f64,
        /// Number of descent iterations
        iterations: usize,
    },
}

impl FitAlgorithm {
    /// Resolve the configured algorithm, falling back to the default on unknown names
    #[must_use]
    pub fn from_config(config: &FittingConfig) -> Self {
        match config.algorithm.parse::<Self>() {
            Ok(Self::ProjectedGradient { .. }) => Self::ProjectedGradient {
                learning_rate: config.gradient_learning_rate,
                iterations: config.gradient_iterations,
            },
            Ok(algorithm) => algorithm,
            Err(e) => {
                warn!(
                    algorithm = %config.algorithm,
                    "Invalid fit algorithm: {e}, using closed_form"
                );
                Self::default()
            }
        }
    }

    /// Get algorithm name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ClosedForm => "closed_form",
            Self::ProjectedGradient { .. } => "projected_gradient",
        }
    }

    /// Get algorithm description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ClosedForm => "Closed-form least squares with a single post-hoc clamp",
            Self::ProjectedGradient { .. } => {
                "Gradient descent with coefficients clamped to bounds every iteration"
            }
        }
    }

    /// Fit coefficients to the regression pairs
    ///
    /// `pairs` must be non-empty; the caller enforces the minimum pair count.
    #[must_use]
    pub fn fit(
        &self,
        pairs: &[RegressionPair],
        variant: ModelVariant,
        config: &FittingConfig,
    ) -> FitResult {
        let columns = ActiveColumns::for_variant(resolve_variant(variant, pairs), pairs);
        let targets = implied_expenditure(pairs, config.kcal_per_mass_unit);

        let result = match self {
            Self::ClosedForm => fit_closed_form(pairs, &targets, columns, config),
            Self::ProjectedGradient {
                learning_rate,
                iterations,
            } => fit_projected_gradient(
                pairs,
                &targets,
                columns,
                config,
                *learning_rate,
                *iterations,
            ),
        };

        debug!(
            algorithm = self.name(),
            variant = %result.variant,
            alpha = result.coefficients.alpha,
            beta = result.coefficients.beta,
            gamma = result.coefficients.gamma,
            pairs = pairs.len(),
            "Fitted energy-balance coefficients"
        );
        result
    }
}

impl FromStr for FitAlgorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "closed_form" | "closed" | "least_squares" | "ols" => Ok(Self::ClosedForm),
            "projected_gradient" | "gradient" | "gradient_descent" => {
                let defaults = FittingConfig::default();
                Ok(Self::ProjectedGradient {
                    learning_rate: defaults.gradient_learning_rate,
                    iterations: defaults.gradient_iterations,
                })
            }
            other => Err(AppError::invalid_input(format!(
                "Unknown fit algorithm: '{other}'. Valid options: closed_form, projected_gradient"
            ))),
        }
    }
}

/// Energy-balance coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// Base burn rate (kcal per mass unit per day)
    pub alpha: f64,
    /// Expenditure per net step (kcal)
    pub beta: f64,
    /// Workout-calorie multiplier
    pub gamma: f64,
}

impl Coefficients {
    /// Create a coefficient set
    #[must_use]
    pub const fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    /// Modeled daily expenditure (kcal)
    #[must_use]
    pub fn expenditure(&self, weight: f64, net_steps: f64, workout_kcal: f64) -> f64 {
        self.gamma
            .mul_add(workout_kcal, self.beta.mul_add(net_steps, self.alpha * weight))
    }

    /// Modeled expenditure for one regression pair
    #[must_use]
    pub fn pair_expenditure(&self, pair: &RegressionPair) -> f64 {
        self.expenditure(pair.weight, pair.net_steps, pair.workout_kcal)
    }
}

/// Output of one fitting pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    /// Fitted coefficients, within bounds for every estimated column
    pub coefficients: Coefficients,
    /// Variant actually fitted (never `Auto`)
    pub variant: ModelVariant,
    /// Number of estimated coefficients
    pub parameter_count: usize,
}

/// Resolve `Auto` against the pair set
#[must_use]
pub fn resolve_variant(variant: ModelVariant, pairs: &[RegressionPair]) -> ModelVariant {
    match variant {
        ModelVariant::Auto if pairs.iter().any(RegressionPair::has_activity) => {
            ModelVariant::MultiParameter
        }
        ModelVariant::Auto => ModelVariant::SingleParameter,
        explicit => explicit,
    }
}

/// Implied daily expenditure `intake - K x weight_change` per pair
#[must_use]
pub fn implied_expenditure(pairs: &[RegressionPair], kcal_per_mass_unit: f64) -> Vec<f64> {
    pairs
        .iter()
        .map(|pair| kcal_per_mass_unit.mul_add(-pair.weight_change, pair.intake_kcal))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Weight,
    NetSteps,
    WorkoutKcal,
}

impl Column {
    fn value(self, pair: &RegressionPair) -> f64 {
        match self {
            Self::Weight => pair.weight,
            Self::NetSteps => pair.net_steps,
            Self::WorkoutKcal => pair.workout_kcal,
        }
    }
}

/// Columns that enter the solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveColumns {
    net_steps: bool,
    workout_kcal: bool,
}

impl ActiveColumns {
    const WEIGHT_ONLY: Self = Self {
        net_steps: false,
        workout_kcal: false,
    };

    fn for_variant(variant: ModelVariant, pairs: &[RegressionPair]) -> Self {
        if variant == ModelVariant::SingleParameter {
            return Self::WEIGHT_ONLY;
        }
        Self {
            net_steps: pairs.iter().any(|p| p.net_steps > 0.0),
            workout_kcal: pairs.iter().any(|p| p.workout_kcal > 0.0),
        }
    }

    fn is_single(self) -> bool {
        self == Self::WEIGHT_ONLY
    }

    fn list(self) -> Vec<Column> {
        let mut columns = vec![Column::Weight];
        if self.net_steps {
            columns.push(Column::NetSteps);
        }
        if self.workout_kcal {
            columns.push(Column::WorkoutKcal);
        }
        columns
    }

    fn variant(self) -> ModelVariant {
        if self.is_single() {
            ModelVariant::SingleParameter
        } else {
            ModelVariant::MultiParameter
        }
    }
}

/// Clamp the estimated coefficients, keeping inactive ones at zero
fn clamp_active(raw: &[f64], columns: &[Column], config: &FittingConfig) -> Coefficients {
    let mut coefficients = Coefficients::new(0.0, 0.0, 0.0);
    for (value, column) in raw.iter().zip(columns) {
        match column {
            Column::Weight => coefficients.alpha = config.alpha.clamp(*value),
            Column::NetSteps => coefficients.beta = config.beta.clamp(*value),
            Column::WorkoutKcal => coefficients.gamma = config.gamma.clamp(*value),
        }
    }
    coefficients
}

fn single_parameter_result(
    pairs: &[RegressionPair],
    targets: &[f64],
    config: &FittingConfig,
) -> FitResult {
    let (numerator, denominator) = pairs
        .iter()
        .zip(targets)
        .fold((0.0, 0.0), |(num, den), (pair, y)| {
            (pair.weight.mul_add(*y, num), pair.weight.mul_add(pair.weight, den))
        });

    let alpha = if denominator > f64::EPSILON && numerator.is_finite() {
        config.alpha.clamp(numerator / denominator)
    } else {
        debug!("Degenerate weight regression, using default alpha");
        config.alpha.clamp(config.alpha.default)
    };

    FitResult {
        coefficients: Coefficients::new(alpha, 0.0, 0.0),
        variant: ModelVariant::SingleParameter,
        parameter_count: 1,
    }
}

fn fit_closed_form(
    pairs: &[RegressionPair],
    targets: &[f64],
    columns: ActiveColumns,
    config: &FittingConfig,
) -> FitResult {
    if columns.is_single() {
        return single_parameter_result(pairs, targets, config);
    }

    let column_list = columns.list();
    match solve_normal_equations(pairs, targets, &column_list) {
        Some(raw) => FitResult {
            coefficients: clamp_active(&raw, &column_list, config),
            variant: columns.variant(),
            parameter_count: column_list.len(),
        },
        None => {
            debug!(
                columns = column_list.len(),
                "Singular normal equations, falling back to single-parameter fit"
            );
            single_parameter_result(pairs, targets, config)
        }
    }
}

/// Root-mean-square of one column, used to condition the solve
fn column_scale(pairs: &[RegressionPair], column: Column) -> f64 {
    let sum_sq: f64 = pairs
        .iter()
        .map(|p| {
            let v = column.value(p);
            v * v
        })
        .sum();
    (sum_sq / pairs.len() as f64).sqrt()
}

/// Least squares over the given columns, `None` when the system is singular
fn solve_normal_equations(
    pairs: &[RegressionPair],
    targets: &[f64],
    columns: &[Column],
) -> Option<Vec<f64>> {
    if pairs.is_empty() {
        return None;
    }
    let scales: Vec<f64> = columns.iter().map(|c| column_scale(pairs, *c)).collect();
    if scales.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return None;
    }

    let design = DMatrix::from_fn(pairs.len(), columns.len(), |i, j| {
        columns[j].value(&pairs[i]) / scales[j]
    });
    let y = DVector::from_column_slice(targets);

    let normal = design.transpose() * &design;
    let rhs = design.transpose() * y;

    let svd = normal.svd(true, true);
    let largest = svd.singular_values.max();
    if !largest.is_finite() || largest <= 0.0 {
        return None;
    }
    let tolerance = largest * SINGULAR_TOLERANCE;
    if svd.rank(tolerance) < columns.len() {
        return None;
    }

    let solution = svd.solve(&rhs, tolerance).ok()?;
    let raw: Vec<f64> = solution
        .iter()
        .zip(&scales)
        .map(|(value, scale)| value / scale)
        .collect();

    raw.iter().all(|v| v.is_finite()).then_some(raw)
}

fn starting_point(column: Column, config: &FittingConfig) -> f64 {
    match column {
        Column::Weight => config.alpha.clamp(config.alpha.default),
        Column::NetSteps => config.beta.clamp(config.beta.default),
        Column::WorkoutKcal => config.gamma.clamp(config.gamma.default),
    }
}

fn clamp_column(column: Column, value: f64, config: &FittingConfig) -> f64 {
    match column {
        Column::Weight => config.alpha.clamp(value),
        Column::NetSteps => config.beta.clamp(value),
        Column::WorkoutKcal => config.gamma.clamp(value),
    }
}

fn fit_projected_gradient(
    pairs: &[RegressionPair],
    targets: &[f64],
    columns: ActiveColumns,
    config: &FittingConfig,
    learning_rate: f64,
    iterations: usize,
) -> FitResult {
    let column_list = columns.list();
    let scales: Vec<f64> = column_list
        .iter()
        .map(|c| column_scale(pairs, *c))
        .collect();
    if pairs.is_empty() || scales.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return single_parameter_result(pairs, targets, config);
    }

    let target_scale = {
        let rms = (targets.iter().map(|y| y * y).sum::<f64>() / targets.len() as f64).sqrt();
        if rms.is_finite() && rms > 0.0 {
            rms
        } else {
            1.0
        }
    };

    // Scaled features and targets keep one learning rate usable across columns
    let features: Vec<Vec<f64>> = pairs
        .iter()
        .map(|p| {
            column_list
                .iter()
                .zip(&scales)
                .map(|(c, s)| c.value(p) / s)
                .collect()
        })
        .collect();
    let scaled_targets: Vec<f64> = targets.iter().map(|y| y / target_scale).collect();

    let to_scaled = |j: usize, value: f64| value * scales[j] / target_scale;
    let from_scaled = |j: usize, value: f64| value * target_scale / scales[j];

    let mut params: Vec<f64> = column_list
        .iter()
        .enumerate()
        .map(|(j, c)| to_scaled(j, starting_point(*c, config)))
        .collect();

    let n = pairs.len() as f64;
    let mut gradient = vec![0.0; params.len()];
    for _ in 0..iterations {
        gradient.iter_mut().for_each(|g| *g = 0.0);
        for (row, y) in features.iter().zip(&scaled_targets) {
            let prediction: f64 = row.iter().zip(&params).map(|(x, p)| x * p).sum();
            let residual = prediction - y;
            for (g, x) in gradient.iter_mut().zip(row) {
                *g += 2.0 * residual * x / n;
            }
        }

        for (j, (param, g)) in params.iter_mut().zip(&gradient).enumerate() {
            let stepped = learning_rate.mul_add(-g, *param);
            *param = to_scaled(j, clamp_column(column_list[j], from_scaled(j, stepped), config));
        }
    }

    let raw: Vec<f64> = params
        .iter()
        .enumerate()
        .map(|(j, p)| from_scaled(j, *p))
        .collect();

    FitResult {
        coefficients: clamp_active(&raw, &column_list, config),
        variant: columns.variant(),
        parameter_count: column_list.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn pair(weight: f64, intake: f64, steps: f64, workout: f64, change: f64) -> RegressionPair {
        RegressionPair {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            weight,
            intake_kcal: intake,
            net_steps: steps,
            workout_kcal: workout,
            weight_change: change,
        }
    }

    #[test]
    fn test_single_parameter_closed_form_matches_ratio() {
        let config = FittingConfig::default();
        // intake - 3500 x change = 2700 at weight 180 implies alpha = 15
        let pairs: Vec<RegressionPair> = (0..6)
            .map(|_| pair(180.0, 2000.0, 0.0, 0.0, -0.2))
            .collect();
        let result = FitAlgorithm::ClosedForm.fit(&pairs, ModelVariant::Auto, &config);
        assert_eq!(result.variant, ModelVariant::SingleParameter);
        assert_eq!(result.parameter_count, 1);
        assert!((result.coefficients.alpha - 15.0).abs() < 1e-9);
        assert!(result.coefficients.beta.abs() < f64::EPSILON);
    }

    #[test]
    fn test_multi_parameter_recovers_exact_model() {
        let config = FittingConfig::default();
        let truth = Coefficients::new(14.0, 0.04, 0.8);
        let pairs: Vec<RegressionPair> = (0..12)
            .map(|i: u32| {
                let x = f64::from(i);
                let weight = x.mul_add(-0.3, 190.0);
                let steps = 700.0f64.mul_add(f64::from(i % 4), 6_000.0);
                let workout = if i % 3 == 0 { 400.0 } else { 50.0 * x };
                let intake = 30.0f64.mul_add(x, 2_400.0);
                let expenditure = truth.expenditure(weight, steps, workout);
                pair(weight, intake, steps, workout, (intake - expenditure) / 3_500.0)
            })
            .collect();

        let result = FitAlgorithm::ClosedForm.fit(&pairs, ModelVariant::Auto, &config);
        assert_eq!(result.variant, ModelVariant::MultiParameter);
        assert_eq!(result.parameter_count, 3);
        assert!((result.coefficients.alpha - 14.0).abs() < 1e-6);
        assert!((result.coefficients.beta - 0.04).abs() < 1e-6);
        assert!((result.coefficients.gamma - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_collinear_columns_fall_back_to_single_parameter() {
        let config = FittingConfig::default();
        // Steps exactly proportional to weight make the system singular
        let pairs: Vec<RegressionPair> = (0..8)
            .map(|i| {
                let weight = f64::from(i).mul_add(-0.5, 180.0);
                pair(weight, 2_200.0, weight * 50.0, 0.0, -0.1)
            })
            .collect();
        let result = FitAlgorithm::ClosedForm.fit(&pairs, ModelVariant::MultiParameter, &config);
        assert_eq!(result.variant, ModelVariant::SingleParameter);
        assert!(result.coefficients.beta.abs() < f64::EPSILON);
    }

    #[test]
    fn test_inactive_columns_stay_zero() {
        let config = FittingConfig::default();
        let pairs: Vec<RegressionPair> = (0..8)
            .map(|i| {
                let x = f64::from(i);
                pair(180.0 - x, 2_500.0, 100.0f64.mul_add(x, 8_000.0), 0.0, -0.1)
            })
            .collect();
        let result = FitAlgorithm::ClosedForm.fit(&pairs, ModelVariant::Auto, &config);
        assert_eq!(result.parameter_count, 2);
        assert!(result.coefficients.gamma.abs() < f64::EPSILON);
    }

    #[test]
    fn test_projected_gradient_stays_in_bounds() {
        let config = FittingConfig::default();
        // Implied alpha of roughly 30 is far above the upper bound
        let pairs: Vec<RegressionPair> = (0..10)
            .map(|i| pair(150.0 + f64::from(i), 3_000.0, 5_000.0, 200.0, -0.4))
            .collect();
        let algorithm = FitAlgorithm::ProjectedGradient {
            learning_rate: 0.05,
            iterations: 500,
        };
        let result = algorithm.fit(&pairs, ModelVariant::Auto, &config);
        let c = result.coefficients;
        assert!(config.alpha.contains(c.alpha));
        assert!(config.beta.contains(c.beta));
        assert!(config.gamma.contains(c.gamma));
        assert!((c.alpha - config.alpha.max).abs() < 1e-9);
    }

    #[test]
    fn test_from_str_and_names() {
        assert_eq!(
            "closed_form".parse::<FitAlgorithm>().unwrap_or_default(),
            FitAlgorithm::ClosedForm
        );
        assert!(matches!(
            "Gradient".parse::<FitAlgorithm>(),
            Ok(FitAlgorithm::ProjectedGradient { .. })
        ));
        assert!("newton".parse::<FitAlgorithm>().is_err());
        assert_eq!(FitAlgorithm::default().name(), "closed_form");
    }
}
