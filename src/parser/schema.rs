//! Trace tree data model.
//!
//! This module defines the reconstructed span tree and the JSON shape it
//! is written in. Field names are camelCase on the wire.

use super::line::ClassifiedEvent;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A node of the reconstructed trace
///
/// Either a matched Start/End pair (with whatever was logged between the
/// two lines as children), a force-closed Start, or a single leaf line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceSpan {
    /// Timestamp of the opening line (or of the leaf line)
    pub timestamp: NaiveDateTime,

    /// Event code of the opening line
    pub event_code: String,

    /// Label shared by the opening and closing lines
    pub base_event_code: String,

    pub detail: String,

    /// Line of the Start event, or of the leaf event
    pub line_number: usize,

    #[serde(default)]
    pub children: Vec<TraceSpan>,

    /// Set when input ended before the matching End line
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unterminated: bool,
}

impl TraceSpan {
    /// Span without children for a single classified line
    pub fn leaf(event: ClassifiedEvent) -> Self {
        Self::with_children(event, Vec::new())
    }

    /// Span for a Start event wrapping everything nested inside it
    pub fn with_children(event: ClassifiedEvent, children: Vec<TraceSpan>) -> Self {
        Self {
            timestamp: event.timestamp,
            event_code: event.event_code,
            base_event_code: event.base_event_code,
            detail: event.detail,
            line_number: event.line_number,
            children,
            unterminated: false,
        }
    }

    /// Span for a Start event whose End never arrived
    pub fn force_closed(event: ClassifiedEvent, children: Vec<TraceSpan>) -> Self {
        let mut span = Self::with_children(event, children);
        span.unterminated = true;
        span
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of spans in this subtree, including self
    pub fn span_count(&self) -> usize {
        self.iter().count()
    }

    /// Length of the longest chain from this span down; a leaf has depth 1
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((span, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(span.children.iter().map(|c| (c, level + 1)));
        }
        deepest
    }

    /// Pre-order walk over this subtree
    pub fn iter(&self) -> SpanIter<'_> {
        SpanIter { pending: vec![self] }
    }
}

// Compared and dropped with explicit stacks: a truncated log can leave
// spans nested hundreds of thousands deep.
impl PartialEq for TraceSpan {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.timestamp != b.timestamp
                || a.event_code != b.event_code
                || a.base_event_code != b.base_event_code
                || a.detail != b.detail
                || a.line_number != b.line_number
                || a.unterminated != b.unterminated
                || a.children.len() != b.children.len()
            {
                return false;
            }
            pending.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl Eq for TraceSpan {}

impl Drop for TraceSpan {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut span) = pending.pop() {
            pending.append(&mut span.children);
        }
    }
}

/// The parsed trace: top-level spans in log order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionTrace {
    spans: Vec<TraceSpan>,
}

impl ExecutionTrace {
    pub fn new(spans: Vec<TraceSpan>) -> Self {
        Self { spans }
    }

    /// Top-level spans
    pub fn spans(&self) -> &[TraceSpan] {
        &self.spans
    }

    pub fn into_spans(self) -> Vec<TraceSpan> {
        self.spans
    }

    /// Number of top-level spans
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Total number of spans at every depth
    pub fn span_count(&self) -> usize {
        self.spans.iter().map(TraceSpan::span_count).sum()
    }

    /// Deepest nesting level; zero for an empty trace
    pub fn max_depth(&self) -> usize {
        self.spans.iter().map(TraceSpan::depth).max().unwrap_or(0)
    }

    /// Pre-order walk over the whole forest
    pub fn iter(&self) -> SpanIter<'_> {
        SpanIter {
            pending: self.spans.iter().rev().collect(),
        }
    }

    /// All spans labelled `base_code`, in pre-order
    pub fn find_by_base_code<'a>(&'a self, base_code: &'a str) -> impl Iterator<Item = &'a TraceSpan> + 'a {
        self.iter().filter(move |span| span.base_event_code == base_code)
    }
}

/// Pre-order iterator over spans
///
/// Uses an explicit stack so arbitrarily deep traces do not recurse.
pub struct SpanIter<'a> {
    pending: Vec<&'a TraceSpan>,
}

impl<'a> Iterator for SpanIter<'a> {
    type Item = &'a TraceSpan;

    fn next(&mut self) -> Option<Self::Item> {
        let span = self.pending.pop()?;
        self.pending.extend(span.children.iter().rev());
        Some(span)
    }
}
