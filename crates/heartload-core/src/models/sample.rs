// ABOUTME: Heart rate sample model, one reading at a timestamp
// ABOUTME: Values are beats per minute; range is enforced by filtering, not by the type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single heart rate reading
///
/// The expected value domain is roughly 30-230 bpm. Out-of-range values are
/// representable; removing them is the job of `HeartRateSeries::filter`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    /// When the reading was taken (one-second resolution)
    pub timestamp: DateTime<Utc>,
    /// Heart rate in beats per minute
    pub bpm: f64,
}

impl HeartRateSample {
    /// Create a sample
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, bpm: f64) -> Self {
        Self { timestamp, bpm }
    }
}
