// ABOUTME: Core types and constants for the adaptive TDEE estimation engine
// ABOUTME: Foundation crate with error handling, daily observation models, and energy constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Adaptive TDEE Core
//!
//! Foundation crate providing shared types and constants for the adaptive TDEE
//! engine. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Energy-balance constants and physiological coefficient bounds
//! - **models**: Daily observation records supplied by the logging subsystem

/// Unified error handling system with standard error codes
pub mod errors;

/// Energy-balance constants organized by domain
pub mod constants;

/// Core data models (`DailyObservation`)
pub mod models;
