// ABOUTME: Heart rate series engine: cleaning, gap repair, statistics and derived metrics
// ABOUTME: Owns a private copy of the session samples; only filter and upsample mutate it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

//! The heart rate series engine.
//!
//! Intended order of use is construct → [`HeartRateSeries::filter`] →
//! [`HeartRateSeries::upsample`] → metrics. Filtering can reopen timestamp gaps,
//! so the two mutations do not commute.

use crate::algorithms::{FactorBased, ZoneBased};
use crate::errors::{MetricsError, MetricsResult};
use crate::zones::{TimeInZones, ZoneBoundarySet, ZoneClassifier};
use chrono::{DateTime, Duration, Utc};
use heartload_core::constants::time::{
    MAX_RESAMPLE_SPAN_SECONDS, RESAMPLE_STEP_SECONDS, SECONDS_PER_MINUTE,
};
use heartload_core::models::{HeartRateSample, Sex};
use serde::Serialize;
use tracing::{debug, warn};

/// One session's heart rate samples, strictly increasing in time
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HeartRateSeries {
    samples: Vec<HeartRateSample>,
}

impl HeartRateSeries {
    /// Build a series from a copy of `samples`
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::UnorderedTimestamps`] if any timestamp is not
    /// strictly later than the one before it.
    pub fn new(samples: &[HeartRateSample]) -> MetricsResult<Self> {
        if let Some(pos) = samples
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(MetricsError::UnorderedTimestamps { index: pos + 1 });
        }

        Ok(Self {
            samples: samples.to_vec(),
        })
    }

    /// Build a series from samples in arbitrary order
    ///
    /// Samples are sorted by timestamp. When several share a timestamp, the
    /// first one in input order is kept.
    #[must_use]
    pub fn from_unsorted(mut samples: Vec<HeartRateSample>) -> Self {
        let before = samples.len();
        samples.sort_by_key(|s| s.timestamp);
        samples.dedup_by_key(|s| s.timestamp);

        let duplicates = before - samples.len();
        if duplicates > 0 {
            warn!(duplicates, "Dropped samples with duplicate timestamps");
        }

        Self { samples }
    }

    /// Current samples
    #[must_use]
    pub fn samples(&self) -> &[HeartRateSample] {
        &self.samples
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series has no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Heart rate values in time order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.bpm)
    }

    /// Remove every sample above `hr_max`
    ///
    /// Removed samples leave timestamp gaps; they are not replaced. The series
    /// may become empty. Returns the number of removed samples.
    pub fn filter(&mut self, hr_max: u32) -> usize {
        let limit = f64::from(hr_max);
        let before = self.samples.len();

        self.samples = self
            .samples
            .iter()
            .copied()
            .filter(|s| s.bpm <= limit)
            .collect();

        let removed = before - self.samples.len();
        if removed > 0 {
            warn!(removed, hr_max, "Filtered heart rate samples above maximum");
        }
        removed
    }

    /// Fill missing seconds so the series becomes a contiguous one-second grid
    ///
    /// Interior gaps are interpolated linearly in time, leading and trailing
    /// gaps hold the nearest known value, and every value is rounded to the
    /// nearest whole bpm (ties to even). A series that already has one sample
    /// per second is left untouched. Returns whether the series was rebuilt.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Domain`] if the series spans more than
    /// [`MAX_RESAMPLE_SPAN_SECONDS`]; the series is left unchanged.
    pub fn upsample(&mut self) -> MetricsResult<bool> {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return Ok(false);
        };

        let origin = first.timestamp;
        let span_seconds = (last.timestamp - origin).num_seconds();
        if span_seconds > MAX_RESAMPLE_SPAN_SECONDS {
            return Err(MetricsError::Domain(format!(
                "Series spans {span_seconds} s, more than the {MAX_RESAMPLE_SPAN_SECONDS} s that can be resampled"
            )));
        }
        let grid_len = usize::try_from(span_seconds / RESAMPLE_STEP_SECONDS).map_or(0, |n| n + 1);

        if grid_len == self.samples.len() && self.is_on_grid(origin) {
            return Ok(false);
        }

        let mut grid: Vec<Option<f64>> = vec![None; grid_len];
        for sample in &self.samples {
            let offset = (sample.timestamp - origin).num_seconds() / RESAMPLE_STEP_SECONDS;
            if let Some(slot) = usize::try_from(offset).ok().and_then(|i| grid.get_mut(i)) {
                // First sample in a one-second bin wins
                slot.get_or_insert(sample.bpm);
            }
        }

        let filled = interpolate_grid(&grid);
        let missing = grid.iter().filter(|slot| slot.is_none()).count();
        debug!(
            original = self.samples.len(),
            resampled = filled.len(),
            missing,
            "Upsampled heart rate series to one-second grid"
        );

        self.samples = grid_timestamps(origin)
            .zip(filled)
            .map(|(timestamp, bpm)| HeartRateSample::new(timestamp, bpm.round_ties_even()))
            .collect();
        Ok(true)
    }

    /// Lowest heart rate
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptySeries`] on an empty series.
    pub fn min(&self) -> MetricsResult<f64> {
        self.ensure_not_empty("min")?;
        Ok(self.values().fold(f64::INFINITY, f64::min))
    }

    /// Highest heart rate
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptySeries`] on an empty series.
    pub fn max(&self) -> MetricsResult<f64> {
        self.ensure_not_empty("max")?;
        Ok(self.values().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Mean heart rate
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptySeries`] on an empty series.
    pub fn mean(&self) -> MetricsResult<f64> {
        self.ensure_not_empty("mean")?;
        Ok(self.values().sum::<f64>() / self.samples.len() as f64)
    }

    /// Difference between highest and lowest heart rate
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptySeries`] on an empty series.
    pub fn range(&self) -> MetricsResult<f64> {
        Ok(self.max()? - self.min()?)
    }

    /// Session duration in minutes, counting the first and last second inclusively
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::EmptySeries`] on an empty series.
    pub fn duration(&self) -> MetricsResult<f64> {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return Err(MetricsError::EmptySeries {
                operation: "duration",
            });
        };
        let span_seconds = (last.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0;
        Ok((span_seconds + 1.0) / SECONDS_PER_MINUTE)
    }

    /// `(mean − hr_rest) / (hr_max − hr_rest)`
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Domain`] if `hr_max <= hr_rest`, or
    /// [`MetricsError::EmptySeries`] on an empty series.
    pub fn compute_delta_hr_ratio(&self, hr_max: u32, hr_rest: u32) -> MetricsResult<f64> {
        let reserve = heart_rate_reserve(hr_max, hr_rest)?;
        Ok((self.mean()? - f64::from(hr_rest)) / reserve)
    }

    /// Exponential TRIMP: `duration × ratio × A × exp(B × ratio)`
    ///
    /// `ratio` is the delta heart rate ratio against `hr_min`, `(A, B)` come
    /// from the model's coefficients for `sex`.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Domain`] if the model has no entry for `sex` or
    /// `hr_max <= hr_min`, or [`MetricsError::EmptySeries`] on an empty series.
    pub fn compute_factor_based_trimp<M>(
        &self,
        model: &M,
        sex: Sex,
        hr_max: u32,
        hr_min: u32,
    ) -> MetricsResult<f64>
    where
        M: FactorBased + ?Sized,
    {
        let coefficients = model
            .coefficients(sex)
            .ok_or_else(|| MetricsError::unknown_sex(model.name(), sex))?;
        let ratio = self.compute_delta_hr_ratio(hr_max, hr_min)?;
        let duration = self.duration()?;

        let score = duration * ratio * coefficients.a * (coefficients.b * ratio).exp();
        debug!(model = model.name(), %sex, ratio, duration, score, "Computed factor-based TRIMP");
        Ok(score)
    }

    /// Zone TRIMP: `Σ weight[i] × samples_in_zone[i]`
    ///
    /// Zones are the model's boundary fractions of `hr_max`; weights pair with
    /// bands by position.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Domain`] if the weight count differs from the
    /// band count, [`MetricsError::MalformedZoneSpec`] if the model's zones are
    /// malformed, or [`MetricsError::EmptySeries`] on an empty series.
    pub fn compute_zone_based_trimp<M>(&self, hr_max: u32, model: &M) -> MetricsResult<f64>
    where
        M: ZoneBased + ?Sized,
    {
        let boundaries = ZoneBoundarySet::new(model.zones())?;
        let weights = model.weights();
        if weights.len() != boundaries.band_count() {
            return Err(MetricsError::weight_zone_mismatch(
                model.name(),
                weights.len(),
                boundaries.band_count(),
            ));
        }
        let time_in_zones = self.classify_against_max(hr_max, &boundaries)?;

        let score = weights
            .iter()
            .zip(time_in_zones.iter())
            .map(|(weight, zone)| weight * zone.samples as f64)
            .sum();
        debug!(model = model.name(), hr_max, score, "Computed zone-based TRIMP");
        Ok(score)
    }

    /// Mean heart rate as a percentage of heart rate reserve
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Domain`] if `hr_max <= hr_min`, or
    /// [`MetricsError::EmptySeries`] on an empty series.
    pub fn compute_percentage_heartrate_reserve(
        &self,
        hr_max: u32,
        hr_min: u32,
    ) -> MetricsResult<f64> {
        Ok(self.compute_delta_hr_ratio(hr_max, hr_min)? * 100.0)
    }

    /// Mean heart rate as a percentage of maximum heart rate
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Domain`] if `hr_max` is zero, or
    /// [`MetricsError::EmptySeries`] on an empty series.
    pub fn compute_percentage_heartrate_max(&self, hr_max: u32) -> MetricsResult<f64> {
        ensure_positive_max(hr_max)?;
        Ok(self.mean()? / f64::from(hr_max) * 100.0)
    }

    /// Time in zones with thresholds at `fraction × hr_max`
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::MalformedZoneSpec`] for malformed fractions,
    /// [`MetricsError::Domain`] if `hr_max` is zero, or
    /// [`MetricsError::EmptySeries`] on an empty series.
    pub fn compute_heartrate_zones(
        &self,
        hr_max: u32,
        zone_fractions: &[f64],
    ) -> MetricsResult<TimeInZones> {
        let boundaries = ZoneBoundarySet::new(zone_fractions)?;
        self.classify_against_max(hr_max, &boundaries)
    }

    /// Time in zones with thresholds at `fraction × (hr_max − hr_min) + hr_min`
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::MalformedZoneSpec`] for malformed fractions,
    /// [`MetricsError::Domain`] if `hr_max <= hr_min`, or
    /// [`MetricsError::EmptySeries`] on an empty series.
    pub fn compute_heartratereserve_zones(
        &self,
        hr_max: u32,
        hr_min: u32,
        zone_fractions: &[f64],
    ) -> MetricsResult<TimeInZones> {
        let boundaries = ZoneBoundarySet::new(zone_fractions)?;
        heart_rate_reserve(hr_max, hr_min)?;
        self.ensure_not_empty("heart rate reserve zones")?;

        Ok(ZoneClassifier::classify(
            &self.samples,
            &boundaries.thresholds_for_reserve(hr_max, hr_min),
            &boundaries.zone_names(),
        ))
    }

    fn classify_against_max(
        &self,
        hr_max: u32,
        boundaries: &ZoneBoundarySet,
    ) -> MetricsResult<TimeInZones> {
        ensure_positive_max(hr_max)?;
        self.ensure_not_empty("heart rate zones")?;
        Ok(ZoneClassifier::compute(&self.samples, hr_max, boundaries))
    }

    fn is_on_grid(&self, origin: DateTime<Utc>) -> bool {
        self.samples
            .iter()
            .zip(grid_timestamps(origin))
            .all(|(sample, expected)| sample.timestamp == expected)
    }

    fn ensure_not_empty(&self, operation: &'static str) -> MetricsResult<()> {
        if self.samples.is_empty() {
            return Err(MetricsError::EmptySeries { operation });
        }
        Ok(())
    }
}

fn heart_rate_reserve(hr_max: u32, hr_rest: u32) -> MetricsResult<f64> {
    if hr_max <= hr_rest {
        return Err(MetricsError::heart_rate_reserve(hr_max, hr_rest));
    }
    Ok(f64::from(hr_max - hr_rest))
}

fn ensure_positive_max(hr_max: u32) -> MetricsResult<()> {
    if hr_max == 0 {
        return Err(MetricsError::Domain("hr_max must be positive".to_owned()));
    }
    Ok(())
}

fn grid_timestamps(origin: DateTime<Utc>) -> impl Iterator<Item = DateTime<Utc>> {
    let step = Duration::seconds(RESAMPLE_STEP_SECONDS);
    std::iter::successors(Some(origin), move |t| t.checked_add_signed(step))
}

/// Fill `None` slots: linear between known neighbours, nearest value at the ends
fn interpolate_grid(grid: &[Option<f64>]) -> Vec<f64> {
    let known: Vec<(usize, f64)> = grid
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.map(|v| (i, v)))
        .collect();

    let (Some(&(first_idx, first_val)), Some(&(last_idx, last_val))) =
        (known.first(), known.last())
    else {
        return Vec::new();
    };

    let mut out = vec![first_val; grid.len()];
    for pair in known.windows(2) {
        let (lo_idx, lo_val) = pair[0];
        let (hi_idx, hi_val) = pair[1];
        let steps = (hi_idx - lo_idx) as f64;
        for (offset, slot) in out[lo_idx..hi_idx].iter_mut().enumerate() {
            *slot = (hi_val - lo_val).mul_add(offset as f64 / steps, lo_val);
        }
    }
    out[first_idx] = first_val;
    for slot in &mut out[last_idx..] {
        *slot = last_val;
    }
    out
}
