//! Folding classified log lines into a span tree, and metrics over it.
//!
//! This module transforms raw execution logs into:
//! - The nested span tree (trace builder)
//! - Per-event-code statistics
//! - Whole-trace summaries

pub mod metrics;
pub mod trace_builder;

// Re-export main types and functions
pub use metrics::{calculate_event_stats, summarize, top_events, EventStat, TraceSummary};
pub use trace_builder::{build, build_with_report, BuildReport};
