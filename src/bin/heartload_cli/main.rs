// ABOUTME: Heartload CLI - heart rate metrics and TRIMP for recorded training files
// ABOUTME: Analyses a single session or a whole directory with athlete parameters from env or flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors
//!
//! Usage:
//! ```bash
//! # Analyse one session with the default athlete
//! heartload-cli analyze running-20240501T070000.csv
//! heartload-cli analyze morning-run.fit
//!
//! # Female athlete, Edwards TRIMP, JSON output
//! heartload-cli --sex female --hr-max 190 --model edwards --json analyze ride.csv
//!
//! # Every CSV and FIT session in a directory
//! heartload-cli batch ./sessions
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use heartload::logging::LoggingConfig;
use heartload::AppResult;
use heartload_core::errors::ErrorResponse;
use heartload_core::models::Sex;
use heartload_intelligence::algorithms::TrimpModel;
use heartload_intelligence::config::athlete::parse_zone_list;
use heartload_intelligence::config::AthleteConfig;
use std::path::PathBuf;
use std::process;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "heartload-cli",
    version,
    about = "Heart rate metrics and training load",
    long_about = "Computes heart rate statistics, time in zones and TRIMP training load for recorded training sessions."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Maximum heart rate (overrides `HEARTLOAD_HR_MAX`)
    #[arg(long, global = true)]
    hr_max: Option<u32>,

    /// Minimum heart rate (overrides `HEARTLOAD_HR_MIN`)
    #[arg(long, global = true)]
    hr_min: Option<u32>,

    /// Athlete sex: male or female (overrides `HEARTLOAD_SEX`)
    #[arg(long, global = true)]
    sex: Option<Sex>,

    /// Comma separated zone boundaries as fractions (overrides `HEARTLOAD_ZONES`)
    #[arg(long, global = true)]
    zones: Option<String>,

    /// TRIMP model (overrides `HEARTLOAD_TRIMP_MODEL`)
    #[arg(long, global = true)]
    model: Option<TrimpModel>,

    /// Print JSON instead of a text report
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Analyse a single session file
    Analyze {
        /// Session file
        file: PathBuf,
    },

    /// Analyse every supported session file in a directory
    Batch {
        /// Directory holding session files
        dir: PathBuf,
    },
}

impl Cli {
    fn athlete_config(&self) -> AppResult<AthleteConfig> {
        let mut config = AthleteConfig::from_env()?;

        if let Some(hr_max) = self.hr_max {
            config.hr_max = hr_max;
        }
        if let Some(hr_min) = self.hr_min {
            config.hr_min = hr_min;
        }
        if let Some(sex) = self.sex {
            config.sex = sex;
        }
        if let Some(zones) = &self.zones {
            config.zone_fractions = parse_zone_list("--zones", zones)?;
        }
        if let Some(model) = self.model {
            config.model = model;
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let config = cli.athlete_config()?;
    debug!(?config, "Athlete configuration resolved");

    match cli.command {
        Command::Analyze { file } => commands::analyze::run(&file, config, cli.json),
        Command::Batch { dir } => commands::batch::run(&dir, &config, cli.json),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::from_env().verbose(cli.verbose).init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let json = cli.json;
    if let Err(e) = run(cli) {
        if json {
            let body = serde_json::to_string(&ErrorResponse::from(&e)).unwrap_or_default();
            println!("{body}");
        }
        eprintln!("Error: {e}");
        process::exit(e.code.exit_code());
    }
}
