// ABOUTME: Heart rate metrics engine with zone classification and TRIMP scoring
// ABOUTME: Owns the session series, repairs gaps, and derives training load metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

#![deny(unsafe_code)]

//! # Heartload Intelligence
//!
//! The computation engine. A [`HeartRateSeries`] is built from one session's
//! samples, cleaned with [`HeartRateSeries::filter`], regularised with
//! [`HeartRateSeries::upsample`], and then queried for statistics, time in
//! heart rate zones and TRIMP scores.
//!
//! ```rust,no_run
//! use heartload_intelligence::{algorithms::BANISTER, HeartRateSeries};
//! use heartload_core::models::{HeartRateSample, Sex};
//! # fn samples() -> Vec<HeartRateSample> { Vec::new() }
//!
//! let mut series = HeartRateSeries::new(&samples())?;
//! series.filter(200);
//! series.upsample()?;
//! let trimp = series.compute_factor_based_trimp(&BANISTER, Sex::Male, 200, 50)?;
//! # Ok::<(), heartload_intelligence::MetricsError>(())
//! ```

/// Engine error types
pub mod errors;

/// The heart rate series engine
pub mod series;

/// Zone boundaries and time-in-zone classification
pub mod zones;

/// TRIMP scoring models
pub mod algorithms;

/// Athlete configuration loaded from the environment
pub mod config;

/// Aggregate per-session metrics
pub mod metrics;

pub use errors::{MetricsError, MetricsResult};
pub use metrics::{MetricsCalculator, SessionMetrics, TrimpScore};
pub use series::HeartRateSeries;
pub use zones::{TimeInZones, ZoneBoundarySet, ZoneClassifier, ZoneCount};
