// ABOUTME: Algorithm abstraction layer enabling pluggable coefficient fitting methods
// ABOUTME: Provides enum-based dispatch for closed-form and projected-gradient energy-balance fits

//! Algorithm Selection Module
//!
//! Fitting methods are selected with a type-safe enum rather than strings or
//! booleans. Configuration stores the algorithm name; [`FitAlgorithm::from_config`]
//! resolves it and falls back to the default when the name is unknown.
//!
//! # Example
//!
//! ```rust,no_run
//! use adaptive_tdee::intelligence::algorithms::FitAlgorithm;
//!
//! let algorithm: FitAlgorithm = "projected_gradient".parse()?;
//! assert_eq!(algorithm.name(), "projected_gradient");
//! # Ok::<(), adaptive_tdee::errors::AppError>(())
//! ```

pub mod energy_balance_fit;

pub use energy_balance_fit::{
    implied_expenditure, resolve_variant, Coefficients, FitAlgorithm, FitResult,
};
