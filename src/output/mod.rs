//! Output writers for parsed traces.
//!
//! This module handles:
//! - JSON traces (write, read, in-memory string)
//! - Indented text trees
//! - Text summaries

pub mod json;
pub mod tree;

// Re-export main functions
pub use json::{read_trace, trace_to_string, validate_output_path, write_trace};
pub use tree::{render_summary, render_tree, TreeOptions};
