//! Line classification and trace data model.
//!
//! This module handles:
//! - The fixed START/END event vocabulary
//! - Classifying one raw log line into an event
//! - Defining the span tree the builder produces

pub mod events;
pub mod line;
pub mod schema;

// Re-export main types
pub use events::EventKind;
pub use line::{classify, parse_timestamp, ClassifiedEvent};
pub use schema::{ExecutionTrace, SpanIter, TraceSpan};
