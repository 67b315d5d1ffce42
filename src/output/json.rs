//! JSON trace output writer.
//!
//! Writes ExecutionTrace values to JSON files with proper formatting.

use crate::parser::ExecutionTrace;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a trace to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `trace` - Trace to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let trace = build(&log_text);
/// write_trace(&trace, "trace.json")?;
/// ```
pub fn write_trace(trace: &ExecutionTrace, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing trace to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    serialize_pretty(trace, &mut writer).map_err(OutputError::SerializationFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!("Trace written successfully ({} bytes)", calculate_file_size(output_path));

    Ok(())
}

/// Write a trace to a string (for testing or in-memory use)
///
/// **Public** - useful for piping to stdout
pub fn trace_to_string(trace: &ExecutionTrace) -> Result<String, OutputError> {
    let mut buf = Vec::new();
    serialize_pretty(trace, &mut buf).map_err(OutputError::SerializationFailed)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Pretty-print on a growable stack
///
/// **Private** - each span nests two JSON levels, so deep traces would
/// otherwise exhaust the thread stack
fn serialize_pretty<W: Write>(trace: &ExecutionTrace, writer: W) -> Result<(), serde_json::Error> {
    let mut ser = serde_json::Serializer::pretty(writer);
    trace.serialize(serde_stacker::Serializer::new(&mut ser))
}

/// Validate that output path is writable
///
/// **Public** - also used by argument validation
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a trace from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::ReadFailed` - File cannot be opened
/// * `OutputError::SerializationFailed` - JSON parse error
///
/// serde_json's nesting limit is lifted; the stack grows on demand instead.
pub fn read_trace(input_path: impl AsRef<Path>) -> Result<ExecutionTrace, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading trace from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::ReadFailed)?;

    let mut de = serde_json::Deserializer::from_reader(BufReader::new(file));
    de.disable_recursion_limit();
    let trace = ExecutionTrace::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(OutputError::SerializationFailed)?;
    de.end().map_err(OutputError::SerializationFailed)?;

    debug!("Trace loaded: {} top-level spans", trace.len());

    Ok(trace)
}
