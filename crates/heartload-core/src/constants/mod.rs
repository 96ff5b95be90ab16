// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Physiological limits, time conversions, zone defaults and environment keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace.

/// Heart rate limits used to validate athlete parameters
///
/// References:
/// - Tanaka, H., Monahan, K.D., & Seals, D.R. (2001). Age-predicted maximal heart rate revisited
///   <https://pubmed.ncbi.nlm.nih.gov/11153730/>
pub mod heart_rate {
    /// Lowest heart rate accepted as an athlete parameter (bpm)
    pub const MIN_VALID_HEART_RATE: u32 = 20;

    /// Highest heart rate accepted as an athlete parameter (bpm)
    pub const MAX_VALID_HEART_RATE: u32 = 250;

    /// Default maximum heart rate when none is configured (bpm)
    pub const DEFAULT_HR_MAX: u32 = 200;

    /// Default resting/minimum heart rate when none is configured (bpm)
    pub const DEFAULT_HR_MIN: u32 = 50;
}

/// Time conversion constants
pub mod time {
    /// Seconds in one minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;

    /// Spacing of the resampled grid in seconds
    pub const RESAMPLE_STEP_SECONDS: i64 = 1;

    /// Longest session span that will be resampled, 48 hours
    pub const MAX_RESAMPLE_SPAN_SECONDS: i64 = 48 * 3600;
}

/// Zone naming
pub mod zones {
    /// Prefix for generated zone names (`zone1`, `zone2`, ...)
    pub const ZONE_NAME_PREFIX: &str = "zone";

    /// Minimum number of boundary points needed to form one band
    pub const MIN_BOUNDARY_POINTS: usize = 2;
}

/// Environment variable names read by configuration loaders
pub mod env_config {
    /// Maximum heart rate (bpm)
    pub const HR_MAX: &str = "HEARTLOAD_HR_MAX";
    /// Minimum / resting heart rate (bpm)
    pub const HR_MIN: &str = "HEARTLOAD_HR_MIN";
    /// Athlete sex used by factor-based TRIMP
    pub const SEX: &str = "HEARTLOAD_SEX";
    /// Comma-separated zone boundary fractions
    pub const ZONES: &str = "HEARTLOAD_ZONES";
    /// Name of the TRIMP model to report as the primary score
    pub const TRIMP_MODEL: &str = "HEARTLOAD_TRIMP_MODEL";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Name of the command-line service
    pub const HEARTLOAD_CLI: &str = "heartload-cli";
}
