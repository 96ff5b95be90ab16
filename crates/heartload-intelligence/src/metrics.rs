// ABOUTME: Per-session metrics aggregation over a cleaned and upsampled heart rate series
// ABOUTME: Runs filter, upsample, statistics, zones and every built-in TRIMP model in one pass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

use crate::algorithms::TrimpModel;
use crate::config::AthleteConfig;
use crate::errors::MetricsResult;
use crate::series::HeartRateSeries;
use crate::zones::TimeInZones;
use serde::{Deserialize, Serialize};
use tracing::info;

/// TRIMP score of one model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimpScore {
    /// Scoring model
    pub model: TrimpModel,
    /// Training impulse
    pub score: f64,
}

/// Every metric derived from one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    /// Samples remaining after filtering and upsampling
    pub samples: usize,
    /// Samples removed for exceeding `hr_max`
    pub samples_filtered: usize,
    /// Whether gaps were filled on the one-second grid
    pub upsampled: bool,
    /// Lowest heart rate
    pub min_hr: f64,
    /// Highest heart rate
    pub max_hr: f64,
    /// Mean heart rate
    pub mean_hr: f64,
    /// `max_hr - min_hr`
    pub range_hr: f64,
    /// Duration in minutes
    pub duration_minutes: f64,
    /// `(mean - hr_min) / (hr_max - hr_min)`
    pub delta_hr_ratio: f64,
    /// Mean heart rate as % of heart rate reserve
    pub percent_hr_reserve: f64,
    /// Mean heart rate as % of maximum
    pub percent_hr_max: f64,
    /// Score of the configured model
    pub trimp: TrimpScore,
    /// Scores of every built-in model
    pub trimp_scores: Vec<TrimpScore>,
    /// Time in zones relative to maximum heart rate
    pub hr_zones: TimeInZones,
    /// Time in zones relative to heart rate reserve
    pub hrr_zones: TimeInZones,
}

impl SessionMetrics {
    /// Score of a specific built-in model
    #[must_use]
    pub fn trimp_for(&self, model: TrimpModel) -> Option<f64> {
        self.trimp_scores
            .iter()
            .find(|s| s.model == model)
            .map(|s| s.score)
    }
}

/// Computes [`SessionMetrics`] for an athlete
#[derive(Debug, Clone)]
pub struct MetricsCalculator {
    config: AthleteConfig,
}

impl MetricsCalculator {
    /// Create a calculator for `config`
    #[must_use]
    pub const fn new(config: AthleteConfig) -> Self {
        Self { config }
    }

    /// Athlete configuration in use
    #[must_use]
    pub const fn config(&self) -> &AthleteConfig {
        &self.config
    }

    /// Filter, upsample and compute every metric
    ///
    /// The series is consumed because filtering and upsampling mutate it.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::MetricsError`] raised by any metric, for
    /// example when every sample was filtered out.
    pub fn analyze(&self, mut series: HeartRateSeries) -> MetricsResult<SessionMetrics> {
        let AthleteConfig {
            hr_max,
            hr_min,
            sex,
            ref zone_fractions,
            model,
        } = self.config;

        let samples_filtered = series.filter(hr_max);
        let upsampled = series.upsample()?;

        let trimp_scores = TrimpModel::ALL
            .iter()
            .map(|m| {
                m.scoring_model()
                    .score(&series, sex, hr_max, hr_min)
                    .map(|score| TrimpScore { model: *m, score })
            })
            .collect::<MetricsResult<Vec<_>>>()?;
        let trimp = TrimpScore {
            model,
            score: model.scoring_model().score(&series, sex, hr_max, hr_min)?,
        };

        let metrics = SessionMetrics {
            samples: series.len(),
            samples_filtered,
            upsampled,
            min_hr: series.min()?,
            max_hr: series.max()?,
            mean_hr: series.mean()?,
            range_hr: series.range()?,
            duration_minutes: series.duration()?,
            delta_hr_ratio: series.compute_delta_hr_ratio(hr_max, hr_min)?,
            percent_hr_reserve: series.compute_percentage_heartrate_reserve(hr_max, hr_min)?,
            percent_hr_max: series.compute_percentage_heartrate_max(hr_max)?,
            trimp,
            trimp_scores,
            hr_zones: series.compute_heartrate_zones(hr_max, zone_fractions)?,
            hrr_zones: series.compute_heartratereserve_zones(hr_max, hr_min, zone_fractions)?,
        };

        info!(
            samples = metrics.samples,
            filtered = samples_filtered,
            upsampled,
            model = %model,
            trimp = metrics.trimp.score,
            duration_minutes = metrics.duration_minutes,
            "Session metrics computed"
        );

        Ok(metrics)
    }
}
