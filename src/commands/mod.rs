//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod parse;
pub mod utils;

// Re-export main command functions
pub use models::ParseArgs;
pub use parse::{execute_parse, read_log, validate_args};
pub use utils::{display_schema, display_version, validate_trace_file};
