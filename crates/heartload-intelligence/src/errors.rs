// ABOUTME: Error kinds raised by the heart rate metrics engine
// ABOUTME: Empty series, domain violations, malformed zone specs and unordered input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

//! Engine error types.
//!
//! Every check runs at the entry of the offending operation, so callers never
//! receive a NaN or infinite metric in place of an error.

use heartload_core::errors::{AppError, ErrorCode};
use heartload_core::models::{Sex, UnknownSexError};
use thiserror::Error;

/// Errors raised by series, zone and scoring operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// A statistic or metric was requested on a series with zero samples
    #[error("Cannot compute {operation} on an empty heart rate series")]
    EmptySeries {
        /// Operation that needed data
        operation: &'static str,
    },

    /// Athlete parameters make the arithmetic undefined
    #[error("Domain error: {0}")]
    Domain(String),

    /// Zone boundaries cannot form ascending bands
    #[error("Malformed zone specification: {0}")]
    MalformedZoneSpec(String),

    /// Input samples are not strictly increasing in time
    #[error("Timestamps must be strictly increasing (violated at sample {index})")]
    UnorderedTimestamps {
        /// Index of the first sample not later than its predecessor
        index: usize,
    },
}

impl MetricsError {
    /// `hr_max` does not exceed the resting / minimum heart rate
    #[must_use]
    pub fn heart_rate_reserve(hr_max: u32, hr_rest: u32) -> Self {
        Self::Domain(format!(
            "hr_max ({hr_max}) must be greater than hr_rest ({hr_rest})"
        ))
    }

    /// A factor-based model has no coefficients for the requested sex
    #[must_use]
    pub fn unknown_sex(model: &str, sex: Sex) -> Self {
        Self::Domain(format!("Model '{model}' has no coefficients for sex '{sex}'"))
    }

    /// A zone-based model pairs a different number of weights and bands
    #[must_use]
    pub fn weight_zone_mismatch(model: &str, weights: usize, bands: usize) -> Self {
        Self::Domain(format!(
            "Model '{model}' has {weights} weights for {bands} zones"
        ))
    }
}

impl From<UnknownSexError> for MetricsError {
    fn from(error: UnknownSexError) -> Self {
        Self::Domain(error.to_string())
    }
}

impl From<MetricsError> for AppError {
    fn from(error: MetricsError) -> Self {
        let code = match &error {
            MetricsError::EmptySeries { .. } => ErrorCode::EmptyData,
            MetricsError::Domain(_) => ErrorCode::ValueOutOfRange,
            MetricsError::MalformedZoneSpec(_) => ErrorCode::InvalidInput,
            MetricsError::UnorderedTimestamps { .. } => ErrorCode::InvalidFormat,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Result alias for engine operations
pub type MetricsResult<T> = Result<T, MetricsError>;
