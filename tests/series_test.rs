// ABOUTME: Integration tests for the heart rate series engine
// ABOUTME: Covers construction, filtering, one-second upsampling and derived scalar metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{assert_close, at, contiguous_series, samples_at, series_at, t0};
use heartload_core::constants::time::MAX_RESAMPLE_SPAN_SECONDS;
use heartload_core::models::HeartRateSample;
use heartload_intelligence::{HeartRateSeries, MetricsError};

#[test]
fn test_basic_statistics() {
    let series = contiguous_series(&[100.0, 120.0, 140.0]);

    assert_close(series.mean().unwrap(), 120.0, 1e-9);
    assert_close(series.min().unwrap(), 100.0, 1e-9);
    assert_close(series.max().unwrap(), 140.0, 1e-9);
    assert_close(series.range().unwrap(), 40.0, 1e-9);
    assert_close(series.duration().unwrap(), 0.05, 1e-9);
    assert_close(
        series.compute_delta_hr_ratio(200, 50).unwrap(),
        70.0 / 150.0,
        1e-9,
    );
}

#[test]
fn test_single_sample_lasts_one_second() {
    let series = contiguous_series(&[130.0]);
    assert_close(series.duration().unwrap(), 1.0 / 60.0, 1e-12);
}

#[test]
fn test_upsample_interpolates_missing_second() {
    let mut series = series_at(&[(0, 100.0), (2, 140.0)]);

    assert!(series.upsample().unwrap());

    assert_eq!(series.len(), 3);
    let timestamps: Vec<_> = series.samples().iter().map(|s| s.timestamp).collect();
    assert_eq!(timestamps, vec![at(0), at(1), at(2)]);
    assert_eq!(series.values().collect::<Vec<_>>(), vec![100.0, 120.0, 140.0]);
}

#[test]
fn test_upsample_interpolates_proportionally_in_time() {
    let mut series = series_at(&[(0, 100.0), (4, 140.0)]);
    series.upsample().unwrap();
    assert_eq!(
        series.values().collect::<Vec<_>>(),
        vec![100.0, 110.0, 120.0, 130.0, 140.0]
    );
}

#[test]
fn test_upsample_is_idempotent() {
    let mut once = series_at(&[(0, 100.0), (3, 107.0), (10, 130.0), (11, 131.0)]);
    assert!(once.upsample().unwrap());

    let mut twice = once.clone();
    assert!(!twice.upsample().unwrap());
    assert_eq!(once, twice);
}

#[test]
fn test_upsample_leaves_contiguous_series_untouched() {
    let mut series = contiguous_series(&[100.4, 101.6, 99.5]);
    let before = series.clone();

    assert!(!series.upsample().unwrap());
    // no rounding either
    assert_eq!(series, before);
}

#[test]
fn test_upsample_rounds_ties_to_even() {
    let mut down = series_at(&[(0, 100.0), (2, 101.0)]);
    down.upsample().unwrap();
    assert_eq!(down.values().nth(1), Some(100.0));

    let mut up = series_at(&[(0, 101.0), (2, 102.0)]);
    up.upsample().unwrap();
    assert_eq!(up.values().nth(1), Some(102.0));
}

#[test]
fn test_upsample_keeps_first_sample_in_a_second() {
    let samples = vec![
        HeartRateSample::new(t0(), 100.0),
        HeartRateSample::new(t0() + Duration::milliseconds(500), 150.0),
        HeartRateSample::new(at(2), 110.0),
    ];
    let mut series = HeartRateSeries::new(&samples).unwrap();

    assert!(series.upsample().unwrap());
    assert_eq!(series.values().collect::<Vec<_>>(), vec![100.0, 105.0, 110.0]);
}

#[test]
fn test_upsample_on_empty_series_is_noop() {
    let mut series = HeartRateSeries::default();
    assert!(!series.upsample().unwrap());
    assert!(series.is_empty());
}

#[test]
fn test_upsample_rejects_multi_day_span() {
    let too_long = MAX_RESAMPLE_SPAN_SECONDS + 1;
    let mut series = series_at(&[(0, 100.0), (too_long, 110.0)]);
    let before = series.clone();

    assert!(matches!(series.upsample(), Err(MetricsError::Domain(_))));
    assert_eq!(series, before);
}

#[test]
fn test_upsample_accepts_longest_allowed_span() {
    let mut series = series_at(&[(0, 100.0), (MAX_RESAMPLE_SPAN_SECONDS, 110.0)]);

    assert!(series.upsample().unwrap());
    assert_eq!(series.len(), MAX_RESAMPLE_SPAN_SECONDS as usize + 1);
}

#[test]
fn test_filter_removes_only_values_above_max() {
    let mut series = contiguous_series(&[150.0, 200.0, 201.0, 240.0, 180.0]);

    assert_eq!(series.filter(200), 2);
    assert_eq!(
        series.values().collect::<Vec<_>>(),
        vec![150.0, 200.0, 180.0]
    );
}

#[test]
fn test_filter_is_monotonic_in_hr_max() {
    let values = [95.0, 130.0, 160.0, 181.0, 199.0, 205.0, 230.0];
    let mut previous = 0;
    for hr_max in [90, 100, 150, 180, 200, 220, 250] {
        let mut series = contiguous_series(&values);
        series.filter(hr_max);
        assert!(series.len() >= previous, "hr_max {hr_max}");
        previous = series.len();
    }
}

#[test]
fn test_filter_then_upsample_fills_reopened_gap() {
    let mut series = contiguous_series(&[100.0, 250.0, 120.0]);

    series.filter(200);
    assert_eq!(series.len(), 2);

    assert!(series.upsample().unwrap());
    assert_eq!(series.values().collect::<Vec<_>>(), vec![100.0, 110.0, 120.0]);
}

#[test]
fn test_filter_can_empty_series() {
    let mut series = contiguous_series(&[210.0, 220.0]);
    assert_eq!(series.filter(200), 2);
    assert!(series.is_empty());
    assert!(matches!(
        series.mean(),
        Err(MetricsError::EmptySeries { .. })
    ));
}

#[test]
fn test_empty_series_errors_everywhere() {
    let series = HeartRateSeries::default();

    assert!(matches!(series.min(), Err(MetricsError::EmptySeries { .. })));
    assert!(matches!(series.max(), Err(MetricsError::EmptySeries { .. })));
    assert!(matches!(series.mean(), Err(MetricsError::EmptySeries { .. })));
    assert!(matches!(series.range(), Err(MetricsError::EmptySeries { .. })));
    assert!(matches!(
        series.duration(),
        Err(MetricsError::EmptySeries { .. })
    ));
    assert!(matches!(
        series.compute_percentage_heartrate_max(200),
        Err(MetricsError::EmptySeries { .. })
    ));
    assert!(matches!(
        series.compute_heartrate_zones(200, &[0.5, 1.0]),
        Err(MetricsError::EmptySeries { .. })
    ));
    assert!(matches!(
        series.compute_heartratereserve_zones(200, 50, &[0.5, 1.0]),
        Err(MetricsError::EmptySeries { .. })
    ));
}

#[test]
fn test_delta_ratio_requires_reserve() {
    let series = contiguous_series(&[120.0]);
    assert!(matches!(
        series.compute_delta_hr_ratio(150, 150),
        Err(MetricsError::Domain(_))
    ));
    assert!(matches!(
        series.compute_delta_hr_ratio(100, 150),
        Err(MetricsError::Domain(_))
    ));
}

#[test]
fn test_percentage_of_reserve() {
    let series = contiguous_series(&[100.0, 120.0, 140.0]);
    assert_close(
        series.compute_percentage_heartrate_reserve(200, 50).unwrap(),
        46.666_666,
        1e-4,
    );
}

#[test]
fn test_percentage_of_max_scales_inversely() {
    let series = contiguous_series(&[100.0, 120.0, 140.0]);
    let at_100 = series.compute_percentage_heartrate_max(100).unwrap();
    let at_200 = series.compute_percentage_heartrate_max(200).unwrap();

    assert_close(at_100, 120.0, 1e-9);
    assert_close(at_200, at_100 / 2.0, 1e-9);
}

#[test]
fn test_percentage_of_max_rejects_zero() {
    let series = contiguous_series(&[120.0]);
    assert!(matches!(
        series.compute_percentage_heartrate_max(0),
        Err(MetricsError::Domain(_))
    ));
}

#[test]
fn test_construction_rejects_unordered_timestamps() {
    let samples = samples_at(&[(0, 100.0), (2, 110.0), (1, 120.0)]);
    assert_eq!(
        HeartRateSeries::new(&samples),
        Err(MetricsError::UnorderedTimestamps { index: 2 })
    );
}

#[test]
fn test_construction_copies_input() {
    let mut samples = samples_at(&[(0, 100.0), (1, 110.0)]);
    let series = HeartRateSeries::new(&samples).unwrap();

    samples[0].bpm = 999.0;
    assert_eq!(series.values().next(), Some(100.0));
}

#[test]
fn test_from_unsorted_sorts_and_drops_later_duplicates() {
    let series = HeartRateSeries::from_unsorted(samples_at(&[
        (2, 140.0),
        (0, 100.0),
        (2, 999.0),
        (1, 120.0),
    ]));
    assert_eq!(series.values().collect::<Vec<_>>(), vec![100.0, 120.0, 140.0]);
}
