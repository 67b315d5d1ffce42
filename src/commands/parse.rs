//! Parse command implementation.
//!
//! The parse command:
//! 1. Reads the raw log file
//! 2. Builds the span tree
//! 3. Calculates metrics
//! 4. Writes and prints the requested outputs

use super::models::ParseArgs;
use crate::aggregator::{build_with_report, calculate_event_stats, summarize};
use crate::output::{render_summary, render_tree, validate_output_path, write_trace, TreeOptions};
use crate::utils::config::MAX_TOP_EVENTS;
use crate::utils::error::InputError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::time::Instant;

/// Execute the parse command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input file cannot be read
/// * Output file cannot be written
///
/// Malformed log content is never an error; it shows up in the build
/// report instead.
pub fn execute_parse(args: ParseArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Parsing execution log: {}", args.input.display());

    info!("Step 1/4: Reading log file...");
    let raw_text = read_log(&args.input).context("Failed to read execution log")?;

    info!("Step 2/4: Building span tree...");
    let (trace, report) = build_with_report(&raw_text);
    info!("Build report: {}", report.summary());
    if !report.is_balanced() {
        warn!(
            "Log is unbalanced: {} stray end(s), {} force-closed span(s)",
            report.stray_ends, report.force_closed
        );
    }

    info!("Step 3/4: Calculating metrics...");
    let stats = calculate_event_stats(&trace);
    let summary = summarize(&trace, &report);
    info!("Trace: {}", summary.summary());

    debug!("Most frequent events:");
    for (i, stat) in stats.iter().take(3).enumerate() {
        debug!("  {}. {} x{} (depth {})", i + 1, stat.base_event_code, stat.count, stat.max_depth);
    }

    info!("Step 4/4: Writing outputs...");
    if let Some(path) = &args.output_json {
        write_trace(&trace, path).context("Failed to write trace JSON")?;
        info!("✓ Trace written to: {}", path.display());
    }

    if args.print_tree {
        let mut options = TreeOptions::new();
        options.max_depth = args.max_depth;
        options.filter = args.filter.clone();
        println!("{}", render_tree(&trace, &options));
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(60));
        println!("{}", render_summary(&summary, &stats, args.top_events));
        println!("{}", "=".repeat(60));
    }

    info!("Parse completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}

/// Read a raw execution log from disk
///
/// **Public** - the parser itself takes text; this is the file adapter
pub fn read_log(path: &Path) -> Result<String, InputError> {
    if path.is_dir() {
        return Err(InputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(String::from_utf8(bytes)?)
}

/// Validate parse arguments
///
/// **Public** - can be called before execute_parse for early validation
pub fn validate_args(args: &ParseArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input log not found: {}", args.input.display());
    }

    if let Some(path) = &args.output_json {
        validate_output_path(path)?;
    }

    if args.top_events == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if args.top_events > MAX_TOP_EVENTS {
        anyhow::bail!("top is too large (max {})", MAX_TOP_EVENTS);
    }

    if args.max_depth == Some(0) {
        anyhow::bail!("max-depth must be greater than 0");
    }

    Ok(())
}
