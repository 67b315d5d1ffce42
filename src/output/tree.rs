//! Plain-text rendering of a trace.
//!
//! One line per span, children indented under their parent:
//!
//! ```text
//! CODE_UNIT [line 0] Test
//!   METHOD [line 1] a()
//!     USER_DEBUG [line 2] hello
//! ```

use crate::aggregator::metrics::{top_events, EventStat, TraceSummary};
use crate::parser::{ExecutionTrace, TraceSpan};
use crate::utils::config::DEFAULT_TREE_INDENT;

/// Tree rendering options
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// Deepest level to print (1 = top level only)
    pub max_depth: Option<usize>,

    /// Only print subtrees rooted at spans with this base event code
    pub filter: Option<String>,

    /// Spaces per nesting level
    pub indent: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            filter: None,
            indent: DEFAULT_TREE_INDENT,
        }
    }
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_filter(mut self, base_code: impl Into<String>) -> Self {
        self.filter = Some(base_code.into());
        self
    }
}

/// Render the trace as an indented tree
///
/// **Public** - used by the parse command
pub fn render_tree(trace: &ExecutionTrace, options: &TreeOptions) -> String {
    let mut lines = Vec::new();

    for root in render_roots(trace, options.filter.as_deref()) {
        render_subtree(root, options, &mut lines);
    }

    lines.join("\n")
}

/// Spans whose subtrees get printed
///
/// Without a filter these are the top-level spans. With one, the
/// outermost matching spans; matches nested inside them are printed as
/// part of that subtree rather than again on their own.
fn render_roots<'a>(trace: &'a ExecutionTrace, filter: Option<&str>) -> Vec<&'a TraceSpan> {
    let Some(code) = filter else {
        return trace.spans().iter().collect();
    };

    let mut roots = Vec::new();
    let mut pending: Vec<&TraceSpan> = trace.spans().iter().rev().collect();
    while let Some(span) = pending.pop() {
        if span.base_event_code == code {
            roots.push(span);
        } else {
            pending.extend(span.children.iter().rev());
        }
    }
    roots
}

fn render_subtree(root: &TraceSpan, options: &TreeOptions, lines: &mut Vec<String>) {
    let mut pending: Vec<(&TraceSpan, usize)> = vec![(root, 1)];

    while let Some((span, depth)) = pending.pop() {
        let expand = options.max_depth.map_or(true, |max| depth < max);
        let hidden = if expand { 0 } else { span.span_count() - 1 };

        lines.push(format_span(span, depth, options.indent, hidden));

        if expand {
            pending.extend(span.children.iter().rev().map(|c| (c, depth + 1)));
        }
    }
}

fn format_span(span: &TraceSpan, depth: usize, indent: usize, hidden: usize) -> String {
    let mut line = format!(
        "{}{} [line {}]",
        " ".repeat((depth - 1) * indent),
        span.base_event_code,
        span.line_number
    );

    if !span.detail.is_empty() {
        line.push(' ');
        line.push_str(&span.detail);
    }
    if span.unterminated {
        line.push_str(" (unterminated)");
    }
    if hidden > 0 {
        line.push_str(&format!(" (+{} hidden)", hidden));
    }

    line
}

/// Create a text summary with per-code counts
///
/// **Public** - printed by `parse --summary`
pub fn render_summary(summary: &TraceSummary, stats: &[EventStat], top_n: usize) -> String {
    let mut lines = Vec::new();

    lines.push("TRACE SUMMARY".to_string());
    lines.push(format!("  Top-level spans:    {}", summary.top_level_spans));
    lines.push(format!("  Total spans:        {}", summary.total_spans));
    lines.push(format!("  Max depth:          {}", summary.max_depth));
    lines.push(format!("  Distinct codes:     {}", summary.distinct_codes));
    lines.push(format!("  Unterminated spans: {}", summary.unterminated_spans));
    lines.push(format!("  Stray ends:         {}", summary.stray_ends));
    lines.push(format!("  Dropped lines:      {}", summary.dropped_lines));
    lines.push(String::new());

    lines.push(format!("  {:<40} {:>8} {:>6}", "EVENT", "COUNT", "DEPTH"));
    lines.push(format!("  {}", "-".repeat(56)));

    for stat in top_events(stats, top_n) {
        // Keep long metric names inside the column
        let name = if stat.base_event_code.chars().count() > 40 {
            let tail: String = stat.base_event_code.chars().take(37).collect();
            format!("{}...", tail)
        } else {
            stat.base_event_code.clone()
        };
        lines.push(format!("  {:<40} {:>8} {:>6}", name, stat.count, stat.max_depth));
    }

    if stats.len() > top_n {
        lines.push(String::new());
        lines.push(format!("  (Showing top {} of {} event codes)", top_n, stats.len()));
    }

    lines.join("\n")
}
