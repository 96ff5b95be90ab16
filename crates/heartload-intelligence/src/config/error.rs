// ABOUTME: Configuration error types for athlete parameter loading and validation
// ABOUTME: Defines error variants for invalid ranges, parse failures and malformed zones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

//! Configuration error types for athlete parameter validation.

use crate::errors::MetricsError;
use heartload_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Maximum heart rate does not exceed the minimum
    #[error("Invalid range: hr_max ({hr_max}) must be greater than hr_min ({hr_min})")]
    InvalidRange {
        /// Configured maximum heart rate
        hr_max: u32,
        /// Configured minimum heart rate
        hr_min: u32,
    },

    /// Numeric value outside the physiological range
    #[error("Value out of range: {field} = {value} (expected {min}..={max})")]
    ValueOutOfRange {
        /// Offending field
        field: &'static str,
        /// Supplied value
        value: u32,
        /// Inclusive lower bound
        min: u32,
        /// Inclusive upper bound
        max: u32,
    },

    /// Failed to parse a configuration value
    #[error("Parse error: {key}: {message}")]
    Parse {
        /// Environment variable or flag name
        key: String,
        /// Parser message
        message: String,
    },

    /// Zone boundaries are not usable
    #[error("Invalid zones: {0}")]
    InvalidZones(#[from] MetricsError),
}

impl ConfigError {
    /// Build a parse error for `key`
    #[must_use]
    pub fn parse(key: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            key: key.into(),
            message: message.to_string(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::new(ErrorCode::ConfigInvalid, error.to_string()).with_source(error)
    }
}
