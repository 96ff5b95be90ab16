// ABOUTME: Training session abstractions: reader trait, loaded session and reader errors
// ABOUTME: Dispatches a file path to the reader registered for its extension
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

//! Training session loading.
//!
//! A [`SessionReader`] turns one recorded training file into a
//! [`TrainingSession`]: training type, start time and heart rate samples in
//! time order. [`open_reader`] picks a reader by file extension.

/// CSV session reader
pub mod csv_reader;
/// FIT activity file reader
pub mod fit_reader;

pub use csv_reader::CsvSessionReader;
pub use fit_reader::FitSessionReader;

use chrono::{DateTime, Utc};
use heartload_core::constants::time::SECONDS_PER_MINUTE;
use heartload_core::errors::{AppError, ErrorCode};
use heartload_core::models::HeartRateSample;
use heartload_intelligence::{HeartRateSeries, MetricsError};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extensions with a registered reader
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "fit"];

/// Training type used when the file name does not carry one
pub const UNKNOWN_TRAINING_TYPE: &str = "unknown";

/// Errors raised while loading or analysing a session file
#[derive(Debug, Error)]
pub enum SessionError {
    /// File could not be opened or read
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The CSV parser rejected the file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The FIT decoder rejected the file
    #[error("FIT error in {path}: {message}")]
    Fit {
        /// File being read
        path: PathBuf,
        /// Decoder message
        message: String,
    },

    /// No reader handles this extension
    #[error("Unsupported session format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A required column is absent from the header
    #[error("Missing column '{0}'")]
    MissingColumn(&'static str),

    /// A timestamp cell could not be parsed
    #[error("Invalid timestamp '{value}' on row {row}")]
    InvalidTimestamp {
        /// 1-based data row
        row: usize,
        /// Raw cell
        value: String,
    },

    /// A heart rate cell is not a number
    #[error("Invalid heart rate '{value}' on row {row}")]
    InvalidHeartRate {
        /// 1-based data row
        row: usize,
        /// Raw cell
        value: String,
    },

    /// Relative timestamps need a start time from the file name
    #[error("Row {row} uses a relative timestamp but the file name carries no start time")]
    MissingStartTime {
        /// 1-based data row
        row: usize,
    },

    /// The engine rejected the samples
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

impl From<SessionError> for AppError {
    fn from(error: SessionError) -> Self {
        let code = match &error {
            SessionError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                ErrorCode::ResourceNotFound
            }
            SessionError::Io { .. } => ErrorCode::StorageError,
            SessionError::Csv(_)
            | SessionError::Fit { .. }
            | SessionError::InvalidTimestamp { .. }
            | SessionError::InvalidHeartRate { .. } => ErrorCode::InvalidFormat,
            SessionError::UnsupportedFormat(_) => ErrorCode::InvalidInput,
            SessionError::MissingColumn(_) | SessionError::MissingStartTime { .. } => {
                ErrorCode::MissingRequiredField
            }
            SessionError::Metrics(inner) => return Self::from(inner.clone()),
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Reads a single recorded training file
pub trait SessionReader: Send + Sync {
    /// File type handled by this reader (extension without the dot)
    fn file_type(&self) -> &str;

    /// Sport or activity recorded in the file
    fn training_type(&self) -> &str;

    /// Start time of the session when the file declares one
    fn start_time(&self) -> Option<DateTime<Utc>>;

    /// Load the session
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the file cannot be read or parsed.
    fn read_session(&self) -> Result<TrainingSession, SessionError>;
}

/// One loaded training session
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSession {
    /// Sport or activity name
    pub training_type: String,
    /// Declared start time, or the first sample's timestamp
    pub start_time: Option<DateTime<Utc>>,
    /// Heart rate samples, strictly increasing in time
    pub heart_rate: Vec<HeartRateSample>,
}

impl TrainingSession {
    /// Minutes between the first and last sample
    #[must_use]
    pub fn duration_minutes(&self) -> Option<f64> {
        let first = self.heart_rate.first()?;
        let last = self.heart_rate.last()?;
        let seconds = (last.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0;
        Some(seconds / SECONDS_PER_MINUTE)
    }

    /// Heart rate series for the engine
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::UnorderedTimestamps`] if the samples are not in
    /// strictly increasing order.
    pub fn heart_rate_series(&self) -> Result<HeartRateSeries, MetricsError> {
        HeartRateSeries::new(&self.heart_rate)
    }
}

impl std::fmt::Display for TrainingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} session", self.training_type)?;
        if let Some(minutes) = self.duration_minutes() {
            write!(f, " lasting {minutes:.1} minutes")?;
        }
        if let Some(start) = self.start_time {
            write!(f, " started at {}", start.to_rfc3339())?;
        }
        Ok(())
    }
}

/// Whether a reader is registered for `path`'s extension
#[must_use]
pub fn is_supported(path: &Path) -> bool {
    extension(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Reader for `path`, chosen by extension
///
/// CSV readers take their metadata from the file name and open lazily. FIT
/// files are decoded here, so read and decode errors surface immediately.
///
/// # Errors
///
/// Returns [`SessionError::UnsupportedFormat`] if no reader handles the file,
/// or the FIT reader's error when a FIT file cannot be decoded.
pub fn open_reader(path: &Path) -> Result<Box<dyn SessionReader>, SessionError> {
    match extension(path).as_deref() {
        Some("csv") => Ok(Box::new(CsvSessionReader::new(path))),
        Some("fit") => Ok(Box::new(FitSessionReader::open(path)?)),
        _ => Err(SessionError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
