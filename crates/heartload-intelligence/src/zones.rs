// ABOUTME: Zone boundary validation and time-in-zone classification for heart rate data
// ABOUTME: Bands are half-open [low, high) over absolute bpm thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

//! Time-in-zone classification.
//!
//! A [`ZoneBoundarySet`] holds validated boundary fractions. It converts them
//! to absolute thresholds relative to either maximum heart rate or heart rate
//! reserve. [`ZoneClassifier`] counts samples per band. With one sample per
//! second after upsampling, a band count is the number of seconds spent in it.
//!
//! A sample equal to the top threshold is outside every band, so a reading of
//! exactly `hr_max` is not counted in the last zone.

use crate::errors::{MetricsError, MetricsResult};
use heartload_core::constants::zones::{MIN_BOUNDARY_POINTS, ZONE_NAME_PREFIX};
use heartload_core::models::HeartRateSample;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validated, strictly ascending zone boundary fractions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneBoundarySet {
    fractions: Vec<f64>,
    starts_at_zero: bool,
}

impl ZoneBoundarySet {
    /// Validate boundary fractions
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::MalformedZoneSpec`] when:
    /// - fewer than two boundary points are given
    /// - a fraction is not finite or lies outside `[0, 1]`
    /// - the fractions are not strictly ascending
    pub fn new(fractions: &[f64]) -> MetricsResult<Self> {
        if fractions.len() < MIN_BOUNDARY_POINTS {
            return Err(MetricsError::MalformedZoneSpec(format!(
                "at least {MIN_BOUNDARY_POINTS} boundary points are required, got {}",
                fractions.len()
            )));
        }

        if let Some(bad) = fractions
            .iter()
            .find(|f| !f.is_finite() || !(0.0..=1.0).contains(*f))
        {
            return Err(MetricsError::MalformedZoneSpec(format!(
                "boundary {bad} is outside [0, 1]"
            )));
        }

        if let Some(pos) = fractions.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(MetricsError::MalformedZoneSpec(format!(
                "boundaries must be strictly ascending ({} followed by {})",
                fractions[pos],
                fractions[pos + 1]
            )));
        }

        Ok(Self {
            fractions: fractions.to_vec(),
            starts_at_zero: fractions[0] == 0.0,
        })
    }

    /// Boundary fractions in ascending order
    #[must_use]
    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    /// Whether the first boundary is exactly zero, which shifts naming to `zone0`
    #[must_use]
    pub const fn starts_at_zero(&self) -> bool {
        self.starts_at_zero
    }

    /// Number of bands (one fewer than the boundary count)
    #[must_use]
    pub fn band_count(&self) -> usize {
        self.fractions.len() - 1
    }

    /// Zone names in band order
    #[must_use]
    pub fn zone_names(&self) -> Vec<String> {
        name_zones(self.band_count(), self.starts_at_zero)
    }

    /// Absolute thresholds as `fraction × hr_max`
    #[must_use]
    pub fn thresholds_for_max(&self, hr_max: u32) -> Vec<f64> {
        let hr_max = f64::from(hr_max);
        self.fractions.iter().map(|f| f * hr_max).collect()
    }

    /// Absolute thresholds as `fraction × (hr_max − hr_min) + hr_min`
    #[must_use]
    pub fn thresholds_for_reserve(&self, hr_max: u32, hr_min: u32) -> Vec<f64> {
        let reserve = f64::from(hr_max) - f64::from(hr_min);
        let hr_min = f64::from(hr_min);
        self.fractions.iter().map(|f| f.mul_add(reserve, hr_min)).collect()
    }
}

/// Generate `band_count` zone names, starting at `zone0` or `zone1`
#[must_use]
pub fn name_zones(band_count: usize, starts_at_zero: bool) -> Vec<String> {
    let offset = usize::from(!starts_at_zero);
    (0..band_count)
        .map(|i| format!("{ZONE_NAME_PREFIX}{}", i + offset))
        .collect()
}

/// Samples counted in one band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneCount {
    /// Zone name (`zone1`, `zone2`, ...)
    pub name: String,
    /// Inclusive lower bound in bpm
    pub lower_bpm: f64,
    /// Exclusive upper bound in bpm
    pub upper_bpm: f64,
    /// Number of samples with `lower_bpm <= bpm < upper_bpm`
    pub samples: usize,
}

/// Time in zones in ascending threshold order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeInZones {
    zones: Vec<ZoneCount>,
}

impl TimeInZones {
    /// Sample count for a zone by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.zones.iter().find(|z| z.name == name).map(|z| z.samples)
    }

    /// Iterate zones in band order
    pub fn iter(&self) -> impl Iterator<Item = &ZoneCount> {
        self.zones.iter()
    }

    /// Sample counts in band order
    #[must_use]
    pub fn counts(&self) -> Vec<usize> {
        self.zones.iter().map(|z| z.samples).collect()
    }

    /// Zone names in band order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.zones.iter().map(|z| z.name.as_str()).collect()
    }

    /// Number of zones
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether there are no zones
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Samples that landed in any zone
    #[must_use]
    pub fn total_samples(&self) -> usize {
        self.zones.iter().map(|z| z.samples).sum()
    }
}

impl<'a> IntoIterator for &'a TimeInZones {
    type Item = &'a ZoneCount;
    type IntoIter = std::slice::Iter<'a, ZoneCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}

/// Counts samples per heart rate band
pub struct ZoneClassifier;

impl ZoneClassifier {
    /// Time in zones with thresholds relative to `hr_max`
    #[must_use]
    pub fn compute(
        samples: &[HeartRateSample],
        hr_max: u32,
        boundaries: &ZoneBoundarySet,
    ) -> TimeInZones {
        Self::classify(
            samples,
            &boundaries.thresholds_for_max(hr_max),
            &boundaries.zone_names(),
        )
    }

    /// Count samples into bands defined by ascending absolute thresholds
    ///
    /// `names` must hold one entry per band (`thresholds.len() - 1`).
    #[must_use]
    pub fn classify(
        samples: &[HeartRateSample],
        thresholds: &[f64],
        names: &[String],
    ) -> TimeInZones {
        let band_count = thresholds.len().saturating_sub(1);
        let mut counts = vec![0_usize; band_count];
        let mut unclassified = 0_usize;

        for sample in samples {
            // Index of the first threshold strictly above the value
            let upper = thresholds.partition_point(|t| *t <= sample.bpm);
            if upper == 0 || upper > band_count {
                unclassified += 1;
            } else {
                counts[upper - 1] += 1;
            }
        }

        debug!(
            bands = band_count,
            classified = samples.len() - unclassified,
            unclassified,
            "Classified heart rate samples into zones"
        );

        let zones = names
            .iter()
            .zip(thresholds.windows(2))
            .zip(counts)
            .map(|((name, bounds), samples)| ZoneCount {
                name: name.clone(),
                lower_bpm: bounds[0],
                upper_bpm: bounds[1],
                samples,
            })
            .collect();

        TimeInZones { zones }
    }
}
