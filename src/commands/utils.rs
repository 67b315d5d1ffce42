use anyhow::Result;
use std::path::PathBuf;
use crate::output::read_trace;
use crate::utils::config::SCHEMA_VERSION;

/// Validate a trace JSON file
pub fn validate_trace_file(file_path: PathBuf) -> Result<()> {
    println!("Validating trace: {}", file_path.display());

    let trace = read_trace(&file_path)?;

    println!("✓ Valid trace JSON");
    println!("  Top-level spans: {}", trace.len());
    println!("  Total spans: {}", trace.span_count());
    println!("  Max depth: {}", trace.max_depth());
    println!(
        "  Unterminated spans: {}",
        trace.iter().filter(|s| s.unterminated).count()
    );

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Apex Trace Studio Trace Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure (array of top-level spans):");
        println!("  timestamp: string       - Time of the opening line (ISO 8601, date fixed to 1970-01-01)");
        println!("  eventCode: string       - Event code of the opening line");
        println!("  baseEventCode: string   - Event code without its start suffix");
        println!("  detail: string          - Fields selected per event code");
        println!("  lineNumber: number      - Zero-based line of the opening event");
        println!("  children: array         - Spans nested one level below");
        println!("  unterminated: boolean?  - Present when input ended before the closing line");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Apex Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Trace Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Rebuilds nested call trees from Apex execution logs.");
}
