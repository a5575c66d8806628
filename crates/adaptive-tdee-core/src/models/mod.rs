// ABOUTME: Core data models consumed by the TDEE estimation engine
// ABOUTME: Re-exports the DailyObservation record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Observations are produced by external logging subsystems (manual entry and
//! wearable sync) and are treated as immutable inputs by the engine.

mod observation;

pub use observation::DailyObservation;
