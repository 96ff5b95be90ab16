// ABOUTME: Configuration module for heartload-intelligence crate
// ABOUTME: Re-exports athlete configuration and its error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

/// Athlete parameters used by every metric
pub mod athlete;
/// Configuration error types
pub mod error;

pub use athlete::AthleteConfig;
pub use error::ConfigError;
