// ABOUTME: Main library entry point for the heartload training load toolkit
// ABOUTME: Reads session files, runs the heart rate engine and reports metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

#![deny(unsafe_code)]

//! # Heartload
//!
//! Heart rate metrics and TRIMP training load for recorded exercise sessions.
//!
//! ## Architecture
//!
//! - **`heartload-core`**: error codes, constants and the sample model
//! - **`heartload-intelligence`**: the series engine, zones and scoring models
//! - **Session readers**: load heart rate samples from training files
//! - **Batch**: analyse a directory of sessions in parallel
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use heartload::batch::analyze_file;
//! use heartload_intelligence::config::AthleteConfig;
//! use heartload_intelligence::MetricsCalculator;
//!
//! let calculator = MetricsCalculator::new(AthleteConfig::from_env()?);
//! let metrics = analyze_file("running-20240501T070000.csv".as_ref(), &calculator)?;
//! println!("TRIMP: {:.1}", metrics.trimp.score);
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Structured logging setup
pub mod logging;

/// Training session file readers
pub mod session;

/// Parallel analysis of session directories
pub mod batch;

pub use heartload_core::errors::{AppError, AppResult, ErrorCode};
pub use heartload_intelligence::{HeartRateSeries, MetricsCalculator, SessionMetrics};
