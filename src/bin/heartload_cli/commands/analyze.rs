// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors
// ABOUTME: Single session analysis command for heartload-cli
// ABOUTME: Reads one file, runs the metrics engine and prints the report

use crate::helpers::display;
use heartload::AppResult;
use heartload::session;
use heartload_intelligence::config::AthleteConfig;
use heartload_intelligence::MetricsCalculator;
use std::path::Path;
use tracing::info;

/// Analyse `file` and print its metrics
pub fn run(file: &Path, config: AthleteConfig, json: bool) -> AppResult<()> {
    let reader = session::open_reader(file)?;
    let training = reader.read_session()?;
    info!(path = %file.display(), session = %training, "Loaded training session");

    let metrics = MetricsCalculator::new(config).analyze(training.heart_rate_series()?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        display::print_session(file, &training, &metrics);
    }
    Ok(())
}
