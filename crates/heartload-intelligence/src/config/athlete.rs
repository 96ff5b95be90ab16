// ABOUTME: Athlete configuration: heart rate bounds, sex, zone boundaries and TRIMP model
// ABOUTME: Loaded from HEARTLOAD_* environment variables with physiological validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

use super::error::ConfigError;
use crate::algorithms::{TrimpModel, EDWARDS};
use crate::zones::ZoneBoundarySet;
use heartload_core::constants::env_config;
use heartload_core::constants::heart_rate::{
    DEFAULT_HR_MAX, DEFAULT_HR_MIN, MAX_VALID_HEART_RATE, MIN_VALID_HEART_RATE,
};
use heartload_core::models::Sex;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Athlete parameters shared by every metric of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteConfig {
    /// Maximum heart rate in bpm
    pub hr_max: u32,
    /// Minimum (resting) heart rate in bpm
    pub hr_min: u32,
    /// Sex used to pick factor-based TRIMP coefficients
    pub sex: Sex,
    /// Zone boundary fractions for time-in-zone reports
    pub zone_fractions: Vec<f64>,
    /// TRIMP model reported as the session score
    pub model: TrimpModel,
}

impl Default for AthleteConfig {
    fn default() -> Self {
        Self {
            hr_max: DEFAULT_HR_MAX,
            hr_min: DEFAULT_HR_MIN,
            sex: Sex::Male,
            zone_fractions: EDWARDS.zones.to_vec(),
            model: TrimpModel::default(),
        }
    }
}

impl AthleteConfig {
    /// Load athlete configuration from environment
    ///
    /// Unset variables fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if a present value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            hr_max: parse_or(&lookup, env_config::HR_MAX, defaults.hr_max)?,
            hr_min: parse_or(&lookup, env_config::HR_MIN, defaults.hr_min)?,
            sex: parse_or(&lookup, env_config::SEX, defaults.sex)?,
            zone_fractions: lookup(env_config::ZONES)
                .map(|raw| parse_zone_list(env_config::ZONES, &raw))
                .transpose()?
                .unwrap_or(defaults.zone_fractions),
            model: parse_or(&lookup, env_config::TRIMP_MODEL, defaults.model)?,
        })
    }

    /// Check heart rate bounds and zone boundaries
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either heart rate lies outside the valid
    /// physiological range, `hr_max <= hr_min`, or the zones are malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_heart_rate("hr_max", self.hr_max)?;
        check_heart_rate("hr_min", self.hr_min)?;

        if self.hr_max <= self.hr_min {
            return Err(ConfigError::InvalidRange {
                hr_max: self.hr_max,
                hr_min: self.hr_min,
            });
        }

        ZoneBoundarySet::new(&self.zone_fractions)?;
        Ok(())
    }
}

/// Parse a comma separated list of zone fractions
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if any entry is not a number.
pub fn parse_zone_list(key: &str, raw: &str) -> Result<Vec<f64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>().map_err(|e| ConfigError::parse(key, e)))
        .collect()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: ToString,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim().parse().map_err(|e| ConfigError::parse(key, e))
    })
}

const fn check_heart_rate(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value < MIN_VALID_HEART_RATE || value > MAX_VALID_HEART_RATE {
        return Err(ConfigError::ValueOutOfRange {
            field,
            value,
            min: MIN_VALID_HEART_RATE,
            max: MAX_VALID_HEART_RATE,
        });
    }
    Ok(())
}
