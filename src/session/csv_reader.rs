// ABOUTME: CSV training file reader producing heart rate samples in time order
// ABOUTME: Takes training type and start time from <type>-YYYYMMDDTHHMMSS.csv file names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

use super::{SessionError, SessionReader, TrainingSession, UNKNOWN_TRAINING_TYPE};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use heartload_core::models::HeartRateSample;
use heartload_intelligence::HeartRateSeries;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Accepted header names for the heart rate column
pub const HEART_RATE_COLUMNS: &[&str] = &["heartRate", "heart_rate"];

/// Accepted header names for the timestamp column
pub const TIMESTAMP_COLUMNS: &[&str] = &["timestamp", "time"];

const FILE_NAME_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

const NAIVE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Reads heart rate samples from a CSV export
///
/// Timestamps may be RFC 3339, naive date-times (taken as UTC), or seconds
/// relative to the start time encoded in the file name. Rows without a heart
/// rate are skipped.
#[derive(Debug, Clone)]
pub struct CsvSessionReader {
    path: PathBuf,
    training_type: String,
    start_time: Option<DateTime<Utc>>,
}

impl CsvSessionReader {
    /// Reader for `path`; metadata is taken from the file name
    #[must_use]
    pub fn new(path: &Path) -> Self {
        let (training_type, start_time) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(parse_file_name)
            .map_or((UNKNOWN_TRAINING_TYPE.to_owned(), None), |(kind, start)| {
                (kind, Some(start))
            });

        Self {
            path: path.to_path_buf(),
            training_type,
            start_time,
        }
    }

    /// File being read
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse CSV content from any reader
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] for missing columns or unparseable cells.
    pub fn parse<R: Read>(&self, input: R) -> Result<TrainingSession, SessionError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        let hr_col = find_column(&headers, HEART_RATE_COLUMNS)
            .ok_or(SessionError::MissingColumn("heart_rate"))?;
        let ts_col = find_column(&headers, TIMESTAMP_COLUMNS)
            .ok_or(SessionError::MissingColumn("timestamp"))?;

        let mut samples = Vec::new();
        let mut skipped = 0_usize;
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let row = index + 1;

            let Some(bpm) = parse_heart_rate(record.get(hr_col).unwrap_or_default(), row)? else {
                skipped += 1;
                continue;
            };
            let timestamp =
                parse_timestamp(record.get(ts_col).unwrap_or_default(), row, self.start_time)?;
            samples.push(HeartRateSample::new(timestamp, bpm));
        }

        let heart_rate = HeartRateSeries::from_unsorted(samples).samples().to_vec();
        debug!(
            path = %self.path.display(),
            samples = heart_rate.len(),
            skipped,
            "Read CSV heart rate session"
        );

        Ok(TrainingSession {
            training_type: self.training_type.clone(),
            start_time: self
                .start_time
                .or_else(|| heart_rate.first().map(|s| s.timestamp)),
            heart_rate,
        })
    }
}

impl SessionReader for CsvSessionReader {
    fn file_type(&self) -> &str {
        "csv"
    }

    fn training_type(&self) -> &str {
        &self.training_type
    }

    fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    fn read_session(&self) -> Result<TrainingSession, SessionError> {
        let file = File::open(&self.path).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.parse(file)
    }
}

/// Split `<type>-YYYYMMDDTHHMMSS` into training type and start time
#[must_use]
pub fn parse_file_name(stem: &str) -> Option<(String, DateTime<Utc>)> {
    let (kind, stamp) = stem.rsplit_once('-')?;
    if kind.is_empty() {
        return None;
    }
    let start = NaiveDateTime::parse_from_str(stamp, FILE_NAME_TIME_FORMAT).ok()?;
    Some((kind.to_owned(), start.and_utc()))
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(&h))
}

fn parse_heart_rate(cell: &str, row: usize) -> Result<Option<f64>, SessionError> {
    if cell.is_empty() {
        return Ok(None);
    }
    let bpm: f64 = cell.parse().map_err(|_| SessionError::InvalidHeartRate {
        row,
        value: cell.to_owned(),
    })?;
    // NaN cells are gaps, same as empty ones
    Ok(bpm.is_finite().then_some(bpm))
}

fn parse_timestamp(
    cell: &str,
    row: usize,
    start: Option<DateTime<Utc>>,
) -> Result<DateTime<Utc>, SessionError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(cell) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(cell, format).ok())
    {
        return Ok(naive.and_utc());
    }
    let invalid = || SessionError::InvalidTimestamp {
        row,
        value: cell.to_owned(),
    };
    if let Ok(offset) = cell.parse::<f64>() {
        if offset.is_finite() {
            let start = start.ok_or(SessionError::MissingStartTime { row })?;
            // Saturating cast; out-of-range offsets are rejected by the checked steps below
            let millis = (offset * 1000.0).round() as i64;
            return Duration::try_milliseconds(millis)
                .and_then(|delta| start.checked_add_signed(delta))
                .ok_or_else(invalid);
        }
    }
    Err(invalid())
}
