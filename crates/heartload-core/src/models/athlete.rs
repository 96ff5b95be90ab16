// ABOUTME: Athlete sex used to select sex-specific TRIMP coefficients
// ABOUTME: Parses case-insensitively from "male"/"m" and "female"/"f"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sex key for factor-based TRIMP coefficient tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    /// Male coefficients
    Male,
    /// Female coefficients
    Female,
}

impl Sex {
    /// Canonical key as used in coefficient tables
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known sex key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sex key '{0}'. Valid options: Male, Female")]
pub struct UnknownSexError(pub String);

impl FromStr for Sex {
    type Err = UnknownSexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(UnknownSexError(s.to_owned())),
        }
    }
}
