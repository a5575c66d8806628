// ABOUTME: Configuration management module for estimator settings and parameters
// ABOUTME: Re-exports the sectioned energy-balance configuration and its validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Intelligence**: windowing, outlier screens, fitting bounds, confidence,
//!   and forecast settings for the energy-balance estimator

/// Estimator configuration and validation
pub mod intelligence;

pub use intelligence::{ConfigError, EnergyBalanceConfig};
