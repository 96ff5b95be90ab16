// ABOUTME: Training Impulse (TRIMP) scoring models with sex-specific and zone-weighted tables
// ABOUTME: Ships Banister, Morton, Stagno factor tables and Edwards / modified Edwards zone tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

use crate::errors::{MetricsError, MetricsResult};
use crate::series::HeartRateSeries;
use heartload_core::models::Sex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Exponential TRIMP coefficients: `score = duration × ratio × A × exp(B × ratio)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    /// Linear multiplier
    #[serde(rename = "A")]
    pub a: f64,
    /// Exponential weighting
    #[serde(rename = "B")]
    pub b: f64,
}

/// Coefficient table keyed by sex
///
/// A missing entry means the model is undefined for that sex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SexCoefficients {
    /// Coefficients for male athletes
    #[serde(rename = "Male", default, skip_serializing_if = "Option::is_none")]
    pub male: Option<Coefficients>,
    /// Coefficients for female athletes
    #[serde(rename = "Female", default, skip_serializing_if = "Option::is_none")]
    pub female: Option<Coefficients>,
}

impl SexCoefficients {
    /// Coefficients for a sex, if the table defines them
    #[must_use]
    pub const fn get(&self, sex: Sex) -> Option<Coefficients> {
        match sex {
            Sex::Male => self.male,
            Sex::Female => self.female,
        }
    }
}

/// A scoring model parameterised by sex-specific exponential coefficients
pub trait FactorBased {
    /// Display name of the model
    fn name(&self) -> &str;

    /// Coefficients for `sex`, or `None` when the table has no entry
    fn coefficients(&self, sex: Sex) -> Option<Coefficients>;
}

/// A scoring model that weights time spent in heart rate bands
pub trait ZoneBased {
    /// Display name of the model
    fn name(&self) -> &str;

    /// Ascending boundary fractions of maximum heart rate
    fn zones(&self) -> &[f64];

    /// One weight per band, in band order
    fn weights(&self) -> &[f64];
}

/// Factor-based TRIMP table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorModel {
    /// Display name
    pub name: Cow<'static, str>,
    /// Coefficients by sex
    pub factors: SexCoefficients,
}

impl FactorBased for FactorModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn coefficients(&self, sex: Sex) -> Option<Coefficients> {
        self.factors.get(sex)
    }
}

/// Zone-based TRIMP table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneModel {
    /// Display name
    pub name: Cow<'static, str>,
    /// Boundary fractions of maximum heart rate
    pub zones: Cow<'static, [f64]>,
    /// Per-band weights
    #[serde(alias = "factors")]
    pub weights: Cow<'static, [f64]>,
}

impl ZoneBased for ZoneModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn zones(&self) -> &[f64] {
        &self.zones
    }

    fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Banister TRIMP
///
/// - Banister, E.W. (1991). "Modeling elite athletic performance." *Physiological Testing of Elite Athletes*.
pub const BANISTER: FactorModel = FactorModel {
    name: Cow::Borrowed("TRIMP Banister"),
    factors: SexCoefficients {
        male: Some(Coefficients { a: 0.64, b: 1.92 }),
        female: Some(Coefficients { a: 0.86, b: 1.67 }),
    },
};

/// Morton TRIMP, Banister's exponent with a multiplier of e
///
/// - Morton, R.H., Fitz-Clarke, J.R., Banister, E.W. (1990). "Modeling human performance in running." *J Appl Physiol*.
pub const MORTON: FactorModel = FactorModel {
    name: Cow::Borrowed("TRIMP Morton"),
    factors: SexCoefficients {
        male: Some(Coefficients { a: 2.718, b: 1.92 }),
        female: Some(Coefficients { a: 2.718, b: 1.67 }),
    },
};

/// Stagno TRIMP, fitted on team-sport athletes, identical for both sexes
///
/// - Stagno, K.M., Thatcher, R., van Someren, K.A. (2007). "A modified TRIMP to quantify the in-season training load of team sport players." *J Sports Sci*.
pub const STAGNO: FactorModel = FactorModel {
    name: Cow::Borrowed("TRIMP Stagno"),
    factors: SexCoefficients {
        male: Some(Coefficients {
            a: 0.1225,
            b: 3.9434,
        }),
        female: Some(Coefficients {
            a: 0.1225,
            b: 3.9434,
        }),
    },
};

/// Edwards TRIMP: five 10% bands from 50% to 100% of max HR, weighted 1 to 5
///
/// - Edwards, S. (1993). "The Heart Rate Monitor Book." Polar Electro Oy.
pub const EDWARDS: ZoneModel = ZoneModel {
    name: Cow::Borrowed("TRIMP Edwards"),
    zones: Cow::Borrowed(&[0.50, 0.60, 0.70, 0.80, 0.90, 1.0]),
    weights: Cow::Borrowed(&[1.0, 2.0, 3.0, 4.0, 5.0]),
};

/// Modified Edwards TRIMP with bands from 65% of max HR and non-linear weights
pub const MODIFIED_EDWARDS: ZoneModel = ZoneModel {
    name: Cow::Borrowed("TRIMP Modified Edwards"),
    zones: Cow::Borrowed(&[0.65, 0.72, 0.79, 0.86, 0.93, 1.0]),
    weights: Cow::Borrowed(&[1.25, 1.71, 2.54, 3.61, 5.16]),
};

/// Any TRIMP table, tagged by family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringModel {
    /// Exponential, sex-specific model
    Factor(FactorModel),
    /// Zone-weighted model
    Zone(ZoneModel),
}

impl ScoringModel {
    /// Display name of the wrapped table
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Factor(model) => FactorBased::name(model),
            Self::Zone(model) => ZoneBased::name(model),
        }
    }

    /// Score a series with this model
    ///
    /// Zone-based models only use `hr_max`; `sex` and `hr_min` are ignored.
    ///
    /// # Errors
    ///
    /// Propagates the errors of
    /// [`HeartRateSeries::compute_factor_based_trimp`] and
    /// [`HeartRateSeries::compute_zone_based_trimp`].
    pub fn score(
        &self,
        series: &HeartRateSeries,
        sex: Sex,
        hr_max: u32,
        hr_min: u32,
    ) -> MetricsResult<f64> {
        match self {
            Self::Factor(model) => series.compute_factor_based_trimp(model, sex, hr_max, hr_min),
            Self::Zone(model) => series.compute_zone_based_trimp(hr_max, model),
        }
    }
}

/// Built-in TRIMP models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimpModel {
    /// Banister exponential TRIMP
    #[default]
    Banister,
    /// Morton exponential TRIMP
    Morton,
    /// Stagno exponential TRIMP
    Stagno,
    /// Edwards zone TRIMP
    Edwards,
    /// Modified Edwards zone TRIMP
    ModifiedEdwards,
}

impl TrimpModel {
    /// Every built-in model in reporting order
    pub const ALL: [Self; 5] = [
        Self::Banister,
        Self::Morton,
        Self::Stagno,
        Self::Edwards,
        Self::ModifiedEdwards,
    ];

    /// Parameter table for this model
    #[must_use]
    pub const fn scoring_model(&self) -> ScoringModel {
        match self {
            Self::Banister => ScoringModel::Factor(BANISTER),
            Self::Morton => ScoringModel::Factor(MORTON),
            Self::Stagno => ScoringModel::Factor(STAGNO),
            Self::Edwards => ScoringModel::Zone(EDWARDS),
            Self::ModifiedEdwards => ScoringModel::Zone(MODIFIED_EDWARDS),
        }
    }

    /// Stable identifier for logging and serialization
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Banister => "banister",
            Self::Morton => "morton",
            Self::Stagno => "stagno",
            Self::Edwards => "edwards",
            Self::ModifiedEdwards => "modified_edwards",
        }
    }

    /// Whether the model is in the factor-based family
    #[must_use]
    pub const fn is_factor_based(&self) -> bool {
        matches!(self, Self::Banister | Self::Morton | Self::Stagno)
    }

    /// Get the formula as a string
    #[must_use]
    pub const fn formula(&self) -> &'static str {
        match self {
            Self::Banister | Self::Morton | Self::Stagno => {
                "duration × HR_reserve_fraction × A × exp(B × HR_reserve_fraction)"
            }
            Self::Edwards | Self::ModifiedEdwards => "Σ(zone_seconds × zone_weight)",
        }
    }
}

impl fmt::Display for TrimpModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrimpModel {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "banister" | "bannister" => Ok(Self::Banister),
            "morton" => Ok(Self::Morton),
            "stagno" | "stango" => Ok(Self::Stagno),
            "edwards" | "zones" => Ok(Self::Edwards),
            "modified_edwards" | "edwards_modified" | "mod" => Ok(Self::ModifiedEdwards),
            other => Err(MetricsError::Domain(format!(
                "Unknown TRIMP model: '{other}'. Valid options: banister, morton, stagno, edwards, modified_edwards"
            ))),
        }
    }
}
