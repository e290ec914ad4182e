//! Output formatting for banners and errors

use anyhow::Error;
use colored::*;
use serde_json::json;

use crate::config::FeedConfig;
use crate::feed::FeedStats;

/// Print the startup banner.
pub fn print_banner(config: &FeedConfig) {
    println!(
        "{}",
        "=== F1 25: Essential Telemetry (UDP format 2025) ===".bold()
    );
    println!(
        "Listening on {}  |  In game: Telemetry ON, UDP Format 2025, Port {}.\n",
        config.bind_addr.to_string().cyan(),
        config.bind_addr.port()
    );
}

/// Print the shutdown line with a short summary.
pub fn print_stopped(stats: &FeedStats) {
    println!(
        "\n{} ({} datagrams, {} telemetry, {} status, {} skipped)",
        "Stopped.".bold(),
        stats.datagrams,
        stats.telemetry,
        stats.status,
        stats.rejected.saturating_add(stats.ignored)
    );
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}
