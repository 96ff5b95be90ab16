// ABOUTME: Tests for CSV training session loading
// ABOUTME: Covers header aliases, timestamp formats, ordering, duplicates and file name metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{assert_close, at, relative_csv, t0, write_file};
use heartload::session::{self, CsvSessionReader, SessionError, SessionReader};
use heartload::{AppError, ErrorCode};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_metadata_from_file_name() {
    let reader = CsvSessionReader::new(Path::new("/data/running-20240501T070000.csv"));

    assert_eq!(reader.file_type(), "csv");
    assert_eq!(reader.training_type(), "running");
    assert_eq!(reader.start_time(), Some(t0()));
}

#[test]
fn test_unrecognised_file_name() {
    let reader = CsvSessionReader::new(Path::new("export.csv"));
    assert_eq!(reader.training_type(), "unknown");
    assert_eq!(reader.start_time(), None);
}

#[test]
fn test_reads_relative_offsets() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "cycling-20240501T070000.csv",
        &relative_csv(&[(0, 100.0), (1, 110.0), (2, 120.0)]),
    );

    let training = CsvSessionReader::new(&path).read_session().unwrap();

    assert_eq!(training.training_type, "cycling");
    assert_eq!(training.start_time, Some(t0()));
    let timestamps: Vec<_> = training.heart_rate.iter().map(|s| s.timestamp).collect();
    assert_eq!(timestamps, vec![at(0), at(1), at(2)]);
    assert_close(training.duration_minutes().unwrap(), 2.0 / 60.0, 1e-12);
}

#[test]
fn test_reads_absolute_timestamps_with_snake_case_header() {
    let csv = "timestamp,heart_rate,power\n\
               2024-05-01T07:00:02Z,130,200\n\
               2024-05-01T07:00:00Z,110,180\n\
               2024-05-01 07:00:01,120,190\n";
    let reader = CsvSessionReader::new(Path::new("export.csv"));
    let training = reader.parse(csv.as_bytes()).unwrap();

    let values: Vec<f64> = training.heart_rate.iter().map(|s| s.bpm).collect();
    assert_eq!(values, vec![110.0, 120.0, 130.0]);
    // no start time in the name, so the first sample stands in
    assert_eq!(training.start_time, Some(t0()));
}

#[test]
fn test_duplicate_timestamps_keep_first_row() {
    let reader = CsvSessionReader::new(Path::new("running-20240501T070000.csv"));
    let training = reader
        .parse(relative_csv(&[(0, 100.0), (1, 111.0), (1, 199.0), (2, 120.0)]).as_bytes())
        .unwrap();

    let values: Vec<f64> = training.heart_rate.iter().map(|s| s.bpm).collect();
    assert_eq!(values, vec![100.0, 111.0, 120.0]);
}

#[test]
fn test_missing_heart_rate_column() {
    let reader = CsvSessionReader::new(Path::new("running-20240501T070000.csv"));
    let err = reader.parse("time,power\n0,200\n".as_bytes()).unwrap_err();
    assert!(matches!(err, SessionError::MissingColumn("heart_rate")));
}

#[test]
fn test_bad_cells_report_row() {
    let reader = CsvSessionReader::new(Path::new("running-20240501T070000.csv"));

    let err = reader
        .parse("time,heartRate\n0,100\n1,abc\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, SessionError::InvalidHeartRate { row: 2, .. }));

    let err = reader
        .parse("time,heartRate\nsoon,100\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, SessionError::InvalidTimestamp { row: 1, .. }));
}

#[test]
fn test_out_of_range_offsets_are_invalid_timestamps() {
    let reader = CsvSessionReader::new(Path::new("running-20240501T070000.csv"));

    for offset in ["1e15", "-1e300", "9e18"] {
        let csv = format!("time,heartRate\n0,100\n{offset},110\n");
        let err = reader.parse(csv.as_bytes()).unwrap_err();
        assert!(
            matches!(&err, SessionError::InvalidTimestamp { row: 2, value } if value == offset),
            "{offset}: {err}"
        );
    }
}

#[test]
fn test_missing_file_maps_to_not_found() {
    let dir = TempDir::new().unwrap();
    let reader = CsvSessionReader::new(&dir.path().join("running-20240501T070000.csv"));

    let err = reader.read_session().unwrap_err();
    assert!(matches!(err, SessionError::Io { .. }));
    assert_eq!(AppError::from(err).code, ErrorCode::ResourceNotFound);
}

#[test]
fn test_open_reader_dispatches_by_extension() {
    assert_eq!(
        session::open_reader(Path::new("ride.CSV")).unwrap().file_type(),
        "csv"
    );
    assert!(matches!(
        session::open_reader(Path::new("ride.gpx")),
        Err(SessionError::UnsupportedFormat(_))
    ));
    assert!(session::is_supported(Path::new("a.csv")));
    assert!(session::is_supported(Path::new("a.fit")));
    assert!(!session::is_supported(Path::new("notes.txt")));
}

#[test]
fn test_session_feeds_engine() {
    let reader = CsvSessionReader::new(Path::new("running-20240501T070000.csv"));
    let training = reader
        .parse(relative_csv(&[(0, 100.0), (2, 140.0)]).as_bytes())
        .unwrap();

    let mut series = training.heart_rate_series().unwrap();
    series.upsample().unwrap();
    assert_eq!(series.values().collect::<Vec<_>>(), vec![100.0, 120.0, 140.0]);
}
