// ABOUTME: Parallel analysis of every supported session file in a directory
// ABOUTME: Uses rayon; one failing file never aborts the others
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors

use crate::session::{self, SessionError};
use heartload_intelligence::config::AthleteConfig;
use heartload_intelligence::{MetricsCalculator, SessionMetrics};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of analysing one file
#[derive(Debug)]
pub struct SessionOutcome {
    /// File that was analysed
    pub path: PathBuf,
    /// Metrics, or why they could not be computed
    pub result: Result<SessionMetrics, SessionError>,
}

/// Serializable view of a [`SessionOutcome`]
#[derive(Debug, Serialize)]
pub struct SessionReport<'a> {
    /// File that was analysed
    pub path: &'a Path,
    /// Metrics when analysis succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<&'a SessionMetrics>,
    /// Error message when analysis failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionOutcome {
    /// Whether metrics were computed
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Serializable report for this outcome
    #[must_use]
    pub fn report(&self) -> SessionReport<'_> {
        SessionReport {
            path: &self.path,
            metrics: self.result.as_ref().ok(),
            error: self.result.as_ref().err().map(ToString::to_string),
        }
    }
}

/// Read, clean and analyse one session file
///
/// # Errors
///
/// Returns a [`SessionError`] if the file cannot be read or the engine rejects
/// its samples.
pub fn analyze_file(
    path: &Path,
    calculator: &MetricsCalculator,
) -> Result<SessionMetrics, SessionError> {
    let reader = session::open_reader(path)?;
    let training = reader.read_session()?;
    let series = training.heart_rate_series()?;
    Ok(calculator.analyze(series)?)
}

/// Analyse every supported, non-hidden file directly inside `dir`
///
/// Outcomes are sorted by path.
///
/// # Errors
///
/// Returns [`SessionError::Io`] if the directory cannot be listed.
pub fn analyze_directory(
    dir: &Path,
    config: &AthleteConfig,
) -> Result<Vec<SessionOutcome>, SessionError> {
    let io_error = |source| SessionError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && !is_hidden(&path) && session::is_supported(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let calculator = MetricsCalculator::new(config.clone());
    let outcomes: Vec<SessionOutcome> = paths
        .into_par_iter()
        .map(|path| {
            let result = analyze_file(&path, &calculator);
            if let Err(e) = &result {
                warn!(path = %path.display(), error = %e, "Session analysis failed");
            }
            SessionOutcome { path, result }
        })
        .collect();

    info!(
        dir = %dir.display(),
        files = outcomes.len(),
        failed = outcomes.iter().filter(|o| !o.is_ok()).count(),
        "Batch analysis complete"
    );
    Ok(outcomes)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
