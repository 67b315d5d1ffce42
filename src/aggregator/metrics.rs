//! Calculate summary metrics over a reconstructed trace.
//!
//! Event statistics count how often each base event code appears and how
//! deep it nests. They are the quickest way to spot a noisy method or a
//! runaway recursion in a large log.

use super::trace_builder::BuildReport;
use crate::parser::{ExecutionTrace, TraceSpan};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// Occurrences of one base event code
///
/// **Public** - returned from calculate_event_stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventStat {
    pub base_event_code: String,

    /// Spans carrying this code anywhere in the tree
    pub count: usize,

    /// Deepest level it occurs at (1 = top level)
    pub max_depth: usize,
}

/// Calculate per-code statistics
///
/// **Public** - main entry point for metrics calculation
///
/// # Returns
/// One entry per base event code, most frequent first, ties broken by code
pub fn calculate_event_stats(trace: &ExecutionTrace) -> Vec<EventStat> {
    let mut by_code: HashMap<&str, EventStat> = HashMap::new();
    let mut pending: Vec<(&TraceSpan, usize)> = trace.spans().iter().rev().map(|s| (s, 1)).collect();

    while let Some((span, depth)) = pending.pop() {
        let stat = by_code
            .entry(span.base_event_code.as_str())
            .or_insert_with(|| EventStat {
                base_event_code: span.base_event_code.clone(),
                count: 0,
                max_depth: 0,
            });
        stat.count += 1;
        stat.max_depth = stat.max_depth.max(depth);

        pending.extend(span.children.iter().rev().map(|c| (c, depth + 1)));
    }

    let mut stats: Vec<EventStat> = by_code.into_values().collect();
    stats.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.base_event_code.cmp(&b.base_event_code))
    });

    debug!("Calculated stats for {} distinct event codes", stats.len());

    stats
}

/// The first `top_n` entries of already sorted stats
pub fn top_events(stats: &[EventStat], top_n: usize) -> &[EventStat] {
    &stats[..top_n.min(stats.len())]
}

/// Whole-trace totals
///
/// **Public** - returned from summarize
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraceSummary {
    pub top_level_spans: usize,
    pub total_spans: usize,
    pub max_depth: usize,
    pub distinct_codes: usize,
    pub unterminated_spans: usize,
    pub stray_ends: usize,
    pub dropped_lines: usize,
}

/// Combine tree totals with the builder's report
///
/// **Public** - provides summary statistics
pub fn summarize(trace: &ExecutionTrace, report: &BuildReport) -> TraceSummary {
    let mut codes: Vec<&str> = trace.iter().map(|s| s.base_event_code.as_str()).collect();
    codes.sort_unstable();
    codes.dedup();

    TraceSummary {
        top_level_spans: trace.len(),
        total_spans: trace.span_count(),
        max_depth: trace.max_depth(),
        distinct_codes: codes.len(),
        unterminated_spans: trace.iter().filter(|s| s.unterminated).count(),
        stray_ends: report.stray_ends,
        dropped_lines: report.dropped_lines,
    }
}

impl TraceSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Spans: {} ({} top-level) | Max depth: {} | Codes: {} | Unterminated: {} | Stray ends: {}",
            self.total_spans,
            self.top_level_spans,
            self.max_depth,
            self.distinct_codes,
            self.unterminated_spans,
            self.stray_ends
        )
    }
}
