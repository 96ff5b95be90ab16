// ABOUTME: FIT activity file reader producing heart rate samples in time order
// ABOUTME: Takes training type from the session sport and start time from file_id.time_created
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

use super::{SessionError, SessionReader, TrainingSession, UNKNOWN_TRAINING_TYPE};
use chrono::{DateTime, Utc};
use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};
use heartload_core::models::HeartRateSample;
use heartload_intelligence::HeartRateSeries;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads heart rate samples from a FIT activity file
///
/// The file is decoded when the reader is opened, since the training type and
/// start time live inside the file rather than in its name. Record messages
/// without both a timestamp and a heart rate are skipped.
#[derive(Debug, Clone)]
pub struct FitSessionReader {
    path: PathBuf,
    session: TrainingSession,
}

impl FitSessionReader {
    /// Open and decode the FIT file at `path`
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file cannot be opened and
    /// [`SessionError::Fit`] if it is not a valid FIT file.
    pub fn open(path: &Path) -> Result<Self, SessionError> {
        let mut file = File::open(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records = fitparser::from_reader(&mut file).map_err(|e| SessionError::Fit {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::from_records(path, &records))
    }

    /// Decode FIT content already in memory; `path` is only used for reporting
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Fit`] if `content` is not a valid FIT file.
    pub fn from_bytes(path: &Path, content: &[u8]) -> Result<Self, SessionError> {
        let records = fitparser::from_bytes(content).map_err(|e| SessionError::Fit {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::from_records(path, &records))
    }

    /// File being read
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn from_records(path: &Path, records: &[FitDataRecord]) -> Self {
        let mut samples = Vec::new();
        let mut skipped = 0_usize;
        for record in records.iter().filter(|r| r.kind() == MesgNum::Record) {
            match record_sample(record) {
                Some(sample) => samples.push(sample),
                None => skipped += 1,
            }
        }
        let heart_rate = HeartRateSeries::from_unsorted(samples).samples().to_vec();

        let training_type = first_field(records, MesgNum::Session, "sport")
            .and_then(|value| match value {
                Value::String(sport) => Some(sport.clone()),
                _ => None,
            })
            .unwrap_or_else(|| UNKNOWN_TRAINING_TYPE.to_owned());
        let start_time = first_field(records, MesgNum::FileId, "time_created")
            .and_then(timestamp)
            .or_else(|| heart_rate.first().map(|s| s.timestamp));

        debug!(
            path = %path.display(),
            samples = heart_rate.len(),
            skipped,
            training_type = %training_type,
            "Read FIT heart rate session"
        );

        Self {
            path: path.to_path_buf(),
            session: TrainingSession {
                training_type,
                start_time,
                heart_rate,
            },
        }
    }
}

impl SessionReader for FitSessionReader {
    fn file_type(&self) -> &str {
        "fit"
    }

    fn training_type(&self) -> &str {
        &self.session.training_type
    }

    fn start_time(&self) -> Option<DateTime<Utc>> {
        self.session.start_time
    }

    fn read_session(&self) -> Result<TrainingSession, SessionError> {
        Ok(self.session.clone())
    }
}

fn record_sample(record: &FitDataRecord) -> Option<HeartRateSample> {
    let mut time = None;
    let mut bpm = None;
    for field in record.fields() {
        match field.name() {
            "timestamp" => time = timestamp(field.value()),
            "heart_rate" => bpm = numeric(field.value()),
            _ => {}
        }
    }
    Some(HeartRateSample::new(time?, bpm?))
}

fn first_field<'a>(
    records: &'a [FitDataRecord],
    kind: MesgNum,
    name: &str,
) -> Option<&'a Value> {
    records
        .iter()
        .filter(|r| r.kind() == kind)
        .flat_map(FitDataRecord::fields)
        .find(|f| f.name() == name)
        .map(fitparser::FitDataField::value)
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Timestamp(t) => Some(t.with_timezone(&Utc)),
        _ => None,
    }
}

fn numeric(value: &Value) -> Option<f64> {
    let bpm = match value {
        Value::UInt8(v) | Value::UInt8z(v) | Value::Byte(v) => f64::from(*v),
        Value::UInt16(v) | Value::UInt16z(v) => f64::from(*v),
        Value::Float32(v) => f64::from(*v),
        Value::Float64(v) => *v,
        _ => return None,
    };
    bpm.is_finite().then_some(bpm)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_heart_rate_values() {
        assert_eq!(numeric(&Value::UInt8(142)), Some(142.0));
        assert_eq!(numeric(&Value::UInt16(171)), Some(171.0));
        assert_eq!(numeric(&Value::Float64(f64::NAN)), None);
        assert_eq!(numeric(&Value::String("high".into())), None);
    }

    #[test]
    fn test_empty_content_is_a_fit_error() {
        let err = FitSessionReader::from_bytes(Path::new("ride.fit"), &[]).unwrap_err();
        assert!(matches!(err, SessionError::Fit { .. }));
    }
}
