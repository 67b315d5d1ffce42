//! Configuration and constants for the parser and CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// The log only carries a time of day, so every timestamp is pinned to
// this date. Metric lines get midnight of the same day.
pub const REFERENCE_YEAR: i32 = 1970;
pub const REFERENCE_MONTH: u32 = 1;
pub const REFERENCE_DAY: u32 = 1;

/// Exact shape of the leading time token: `HH:mm:ss.fff`
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";
pub const TIMESTAMP_LEN: usize = 12;

/// Field separator for structural lines
pub const FIELD_SEPARATOR: char = '|';

/// Joiner used when a detail is assembled from several fields
pub const DETAIL_JOINER: &str = " | ";

// Aggregate limit lines start with two spaces and one of these
// (compared case-insensitively)
pub const METRIC_PREFIXES: &[&str] = &["  Number of ", "  Maximum "];

/// Default number of event codes listed in summaries
pub const DEFAULT_TOP_EVENTS: usize = 10;
pub const MAX_TOP_EVENTS: usize = 1000;

/// Default indentation width for the text tree
pub const DEFAULT_TREE_INDENT: usize = 2;
