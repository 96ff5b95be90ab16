// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors
// ABOUTME: Directory analysis command for heartload-cli
// ABOUTME: Runs every session in parallel and prints one line or JSON object per file

use crate::helpers::display;
use heartload::batch::{self, SessionOutcome};
use heartload::AppResult;
use heartload_intelligence::config::AthleteConfig;
use std::path::Path;

/// Analyse every session in `dir` and print a summary
pub fn run(dir: &Path, config: &AthleteConfig, json: bool) -> AppResult<()> {
    let outcomes = batch::analyze_directory(dir, config)?;

    if json {
        let reports: Vec<_> = outcomes.iter().map(SessionOutcome::report).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        display::print_batch(&outcomes);
    }
    Ok(())
}
