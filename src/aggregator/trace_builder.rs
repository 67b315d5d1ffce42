//! Rebuild the nested span tree from a flat Apex execution log.
//!
//! The log is one forward stream with no lookahead, so nesting is tracked
//! with an explicit stack of open frames instead of recursion:
//!
//! ```text
//! CODE_UNIT_STARTED   push  [CODE_UNIT]
//! METHOD_ENTRY        push  [CODE_UNIT, METHOD]
//! USER_DEBUG          leaf  -> METHOD's children
//! METHOD_EXIT         pop   METHOD span -> CODE_UNIT's children
//! CODE_UNIT_FINISHED  pop   CODE_UNIT span -> top level
//! ```

use crate::parser::{classify, ClassifiedEvent, EventKind, ExecutionTrace, TraceSpan};
use log::{debug, warn};
use serde::Serialize;

/// Counters describing how a log was folded into a trace
///
/// **Public** - returned by `build_with_report`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Lines seen, blank ones included
    pub lines_read: usize,

    pub blank_lines: usize,

    /// Non-blank lines the classifier could not recognise
    pub dropped_lines: usize,

    /// End events that arrived with nothing open
    pub stray_ends: usize,

    /// Spans still open at end of input
    pub force_closed: usize,
}

impl BuildReport {
    /// True when every Start met its End and no End was unmatched
    pub fn is_balanced(&self) -> bool {
        self.stray_ends == 0 && self.force_closed == 0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Lines: {} | Blank: {} | Dropped: {} | Stray ends: {} | Force-closed: {}",
            self.lines_read, self.blank_lines, self.dropped_lines, self.stray_ends, self.force_closed
        )
    }
}

/// A Start event still waiting for its End, with what has nested so far
struct OpenFrame {
    start: ClassifiedEvent,
    children: Vec<TraceSpan>,
}

/// Build the execution trace from raw log text
///
/// **Public** - main entry point of the trace builder
///
/// Total for any input: unrecognised lines are dropped, an End with
/// nothing open becomes a leaf, and spans left open at the end are
/// force-closed.
pub fn build(raw_text: &str) -> ExecutionTrace {
    build_with_report(raw_text).0
}

/// Build the execution trace and report how the input was handled
///
/// **Public** - same as `build`, plus diagnostics
///
/// # Algorithm
/// 1. Classify each line; skip blanks and unrecognised lines
/// 2. Start: push a frame with an empty child list
/// 3. End: pop the top frame into a span, append it to the new top
/// 4. Leaf: append a childless span to the top frame (or top level)
/// 5. At end of input, close remaining frames innermost first
pub fn build_with_report(raw_text: &str) -> (ExecutionTrace, BuildReport) {
    let mut report = BuildReport::default();
    let mut stack: Vec<OpenFrame> = Vec::new();
    let mut top_level: Vec<TraceSpan> = Vec::new();

    for (line_number, raw_line) in raw_text.lines().enumerate() {
        report.lines_read += 1;

        let Some(event) = classify(raw_line, line_number) else {
            if raw_line.trim().is_empty() {
                report.blank_lines += 1;
            } else {
                report.dropped_lines += 1;
            }
            continue;
        };

        match event.kind {
            EventKind::Start => stack.push(OpenFrame {
                start: event,
                children: Vec::new(),
            }),
            EventKind::End => match stack.pop() {
                Some(frame) => {
                    if !event.event_code.starts_with(&frame.start.base_event_code) {
                        debug!(
                            "Line {}: {} closes {} opened on line {}",
                            event.line_number,
                            event.event_code,
                            frame.start.event_code,
                            frame.start.line_number
                        );
                    }
                    let span = TraceSpan::with_children(frame.start, frame.children);
                    accumulator(&mut stack, &mut top_level).push(span);
                }
                None => {
                    warn!(
                        "Line {}: {} has no open span, keeping it as a leaf",
                        event.line_number, event.event_code
                    );
                    report.stray_ends += 1;
                    top_level.push(TraceSpan::leaf(event));
                }
            },
            EventKind::Leaf => {
                accumulator(&mut stack, &mut top_level).push(TraceSpan::leaf(event));
            }
        }
    }

    if !stack.is_empty() {
        warn!("Input ended with {} open span(s), force-closing", stack.len());
    }

    while let Some(frame) = stack.pop() {
        report.force_closed += 1;
        let span = TraceSpan::force_closed(frame.start, frame.children);
        accumulator(&mut stack, &mut top_level).push(span);
    }

    debug!(
        "Built trace with {} top-level spans ({})",
        top_level.len(),
        report.summary()
    );

    (ExecutionTrace::new(top_level), report)
}

/// Child list of the innermost open frame, or the top level
fn accumulator<'a>(
    stack: &'a mut [OpenFrame],
    top_level: &'a mut Vec<TraceSpan>,
) -> &'a mut Vec<TraceSpan> {
    match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => top_level,
    }
}
