// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Heartload Contributors
// ABOUTME: Output formatting helpers for heartload-cli
// ABOUTME: Renders session metrics and batch summaries as plain text

use heartload::batch::SessionOutcome;
use heartload::session::TrainingSession;
use heartload_intelligence::{SessionMetrics, TimeInZones};
use std::path::Path;

/// Print the full report of one session
pub fn print_session(path: &Path, training: &TrainingSession, metrics: &SessionMetrics) {
    println!("\n{}", path.display());
    println!("{}", "=".repeat(60));
    println!("{training}");
    println!(
        "   Samples: {} ({} filtered{})",
        metrics.samples,
        metrics.samples_filtered,
        if metrics.upsampled { ", gaps filled" } else { "" }
    );
    println!("   Duration: {:.1} min", metrics.duration_minutes);
    println!(
        "   Heart rate: min {:.0} / mean {:.1} / max {:.0} bpm",
        metrics.min_hr, metrics.mean_hr, metrics.max_hr
    );
    println!(
        "   Intensity: {:.1}% HRR, {:.1}% HRmax",
        metrics.percent_hr_reserve, metrics.percent_hr_max
    );

    println!("\nTRIMP");
    for score in &metrics.trimp_scores {
        let marker = if score.model == metrics.trimp.model { "*" } else { " " };
        println!("  {marker} {:<18} {:>8.1}", score.model.name(), score.score);
    }

    print_zones("Time in zones (% HRmax)", &metrics.hr_zones);
    print_zones("Time in zones (% HRR)", &metrics.hrr_zones);
}

fn print_zones(title: &str, zones: &TimeInZones) {
    println!("\n{title}");
    for zone in zones {
        println!(
            "   {:<7} {:>5.0}-{:<5.0} {:>6} s",
            zone.name, zone.lower_bpm, zone.upper_bpm, zone.samples
        );
    }
}

/// Print one summary line per file
pub fn print_batch(outcomes: &[SessionOutcome]) {
    for outcome in outcomes {
        match &outcome.result {
            Ok(metrics) => println!(
                "{:<50} {:>7.1} min  {} {:>8.1}",
                outcome.path.display(),
                metrics.duration_minutes,
                metrics.trimp.model,
                metrics.trimp.score
            ),
            Err(e) => println!("{:<50} error: {e}", outcome.path.display()),
        }
    }

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    println!(
        "\n{} sessions analysed, {failed} failed",
        outcomes.len() - failed
    );
}
