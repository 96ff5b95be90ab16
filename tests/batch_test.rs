// ABOUTME: Tests for parallel directory analysis
// ABOUTME: Builds a temporary directory of session files and checks per-file outcomes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{relative_csv, write_file};
use heartload::batch::{analyze_directory, analyze_file};
use heartload::session::SessionError;
use heartload_intelligence::config::AthleteConfig;
use heartload_intelligence::{MetricsCalculator, MetricsError};
use tempfile::TempDir;

fn steady_session() -> String {
    let points: Vec<(i64, f64)> = (0..120).map(|i| (i, 140.0)).collect();
    relative_csv(&points)
}

#[test]
fn test_analyze_directory_reports_every_supported_file() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "running-20240501T070000.csv", &steady_session());
    write_file(dir.path(), "cycling-20240502T180000.csv", &steady_session());
    // every sample above hr_max: empty after filtering
    write_file(
        dir.path(),
        "sprint-20240503T090000.csv",
        &relative_csv(&[(0, 230.0), (1, 235.0)]),
    );
    write_file(dir.path(), ".hidden-20240501T070000.csv", &steady_session());
    write_file(dir.path(), "notes.txt", "not a session");

    let outcomes = analyze_directory(dir.path(), &AthleteConfig::default()).unwrap();

    let names: Vec<_> = outcomes
        .iter()
        .map(|o| o.path.file_name().unwrap().to_str().unwrap().to_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "cycling-20240502T180000.csv",
            "running-20240501T070000.csv",
            "sprint-20240503T090000.csv",
        ]
    );

    assert!(outcomes[0].is_ok());
    assert!(outcomes[1].is_ok());
    assert!(matches!(
        outcomes[2].result,
        Err(SessionError::Metrics(MetricsError::EmptySeries { .. }))
    ));
}

#[test]
fn test_outcome_report_serializes_error() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "bad-20240501T070000.csv", "time,power\n0,1\n");

    let outcomes = analyze_directory(dir.path(), &AthleteConfig::default()).unwrap();
    let json = serde_json::to_value(outcomes[0].report()).unwrap();

    assert!(json.get("metrics").is_none());
    assert!(json["error"].as_str().unwrap().contains("heart_rate"));
}

#[test]
fn test_unreadable_offsets_fail_only_their_file() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "running-20240501T070000.csv", &steady_session());
    write_file(
        dir.path(),
        "swimming-20240501T070000.csv",
        "time,heartRate\n0,100\n1e15,110\n",
    );
    // readable, but weeks long
    write_file(
        dir.path(),
        "walking-20240501T070000.csv",
        "time,heartRate\n0,100\n2000000,110\n",
    );

    let outcomes = analyze_directory(dir.path(), &AthleteConfig::default()).unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_ok());
    assert!(matches!(
        outcomes[1].result,
        Err(SessionError::InvalidTimestamp { row: 2, .. })
    ));
    assert!(matches!(
        outcomes[2].result,
        Err(SessionError::Metrics(MetricsError::Domain(_)))
    ));
}

#[test]
fn test_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = analyze_directory(&dir.path().join("absent"), &AthleteConfig::default());
    assert!(matches!(result, Err(SessionError::Io { .. })));
}

#[test]
fn test_analyze_file_matches_directory_result() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "running-20240501T070000.csv", &steady_session());

    let calculator = MetricsCalculator::new(AthleteConfig::default());
    let single = analyze_file(&path, &calculator).unwrap();
    let outcomes = analyze_directory(dir.path(), &AthleteConfig::default()).unwrap();

    assert_eq!(outcomes[0].result.as_ref().unwrap(), &single);
    assert_eq!(single.samples, 120);
}
