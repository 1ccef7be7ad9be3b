use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::common::format::{self, format_categories};
use crate::dispatch::{Outcome, ResultsSummary};
use crate::origin::Origin;
use crate::session::{Scope, Session, SelectionStats};

/// Everything a finished run produced, as written by `--format json`
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub timestamp: DateTime<Utc>,
    pub duration_secs: f64,
    pub scope: Scope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    pub dry_run: bool,
    pub outcomes: Vec<Outcome>,
    pub summary: ResultsSummary,
}

/// Print the category list in human-readable format
pub fn print_categories(session: &Session) {
    let stats = session.stats();
    println!();
    println!(
        "{}  Cache Nuker  •  {}",
        "💣",
        format!("Target: {}", session.scope().label()).cyan()
    );
    println!("{}", "─".repeat(60).dimmed());
    match session.origin() {
        Some(origin) => format::print_kv("Site", origin.as_str()),
        None => format::print_kv("Site", "none detected (site scope unavailable)"),
    }
    println!("{}", "─".repeat(60).dimmed());
    println!();

    for view in session.views() {
        let mark = if view.selected {
            "●".green()
        } else {
            "○".dimmed()
        };
        let line = format!(
            "{:<16} {:<18} {}",
            view.category.id.as_str(),
            view.category.name,
            view.category.description
        );
        if view.interactive {
            println!("  {} {}  {}", mark, view.category.icon, line);
        } else {
            println!(
                "  {} {}  {}  {}",
                "-".dimmed(),
                view.category.icon,
                line.dimmed(),
                "(global only)".dimmed()
            );
        }
    }

    println!();
    print_stats(&stats);
}

/// Print the stats line under the category list
pub fn print_stats(stats: &SelectionStats) {
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  {}/{} selected  •  {}  •  {}",
        stats.selected,
        stats.available,
        stats.select_all_label().dimmed(),
        stats.run_label().bold()
    );
    println!();
}

/// Print the category list as JSON
pub fn print_categories_json(session: &Session) -> Result<()> {
    let json = serde_json::json!({
        "scope": session.scope(),
        "origin": session.origin(),
        "site_available": session.site_available(),
        "categories": session.views(),
        "stats": session.stats(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Print a minimal summary: `selected available`
pub fn print_categories_quiet(session: &Session) {
    let stats = session.stats();
    println!("{}  {}", stats.selected, stats.available);
}

/// Show a short notice, the terminal version of a toast
pub fn print_notice(message: &str) {
    eprintln!("  {} {}", "⚠".yellow(), message.yellow());
}

/// Progress bar for a clear run of `total` categories
pub fn run_progress_bar(total: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.red} [{bar:40.red/blue}] {pos}/{len} {msg}")?
            .progress_chars("━━░"),
    );
    Ok(pb)
}

/// Print the results view
pub fn print_results(report: &RunReport) {
    let summary = &report.summary;
    println!();
    println!("{}  Results", if summary.is_complete() { "💥" } else { "🛡️" });
    println!("{}", "─".repeat(60).dimmed());
    let message = if summary.is_complete() {
        summary.message.green().bold()
    } else {
        summary.message.yellow().bold()
    };
    println!("  {}", message);
    println!(
        "  {} in {}{}",
        format_categories(report.outcomes.len()),
        format::format_duration(report.duration_secs).cyan(),
        if report.dry_run { "  (dry run)".dimmed().to_string() } else { String::new() }
    );
    println!("{}", "─".repeat(60).dimmed());
    println!();

    for outcome in &report.outcomes {
        let status = if outcome.success {
            outcome.status_label().green()
        } else {
            outcome.status_label().red()
        };
        println!(
            "    {} {:<20} {}",
            outcome.category.icon, outcome.category.name, status
        );
        if let Some(error) = &outcome.error {
            println!("      {} {}", "↳".dimmed(), error.dimmed());
        }
    }
    println!();
}

/// Print results as JSON
pub fn print_results_json(report: &RunReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Print a minimal summary: `cleared failed`
pub fn print_results_quiet(report: &RunReport) {
    println!(
        "{}  {}",
        report.summary.success_count, report.summary.fail_count
    );
}
