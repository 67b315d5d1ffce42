//! Apex Trace Studio
//!
//! Rebuilds the nested call tree of an Apex execution log.
//!
//! The log is a flat, pipe-delimited stream of timestamped events. Some
//! events open a span (`METHOD_ENTRY`), some close one (`METHOD_EXIT`),
//! the rest are leaves. This crate classifies each line and folds the
//! stream into an [`ExecutionTrace`] in a single forward pass.
//!
//! ## Getting Started
//!
//! ```
//! let log = "09:00:00.001 (1)|CODE_UNIT_STARTED|[EXTERNAL]|Test\n\
//!            09:00:00.002 (2)|CODE_UNIT_FINISHED|Test";
//!
//! let trace = apex_trace_studio::build(log);
//! assert_eq!(trace.spans()[0].base_event_code, "CODE_UNIT");
//! ```
//!
//! The parser is total: malformed lines are dropped, unmatched closing
//! lines are kept as leaves, and spans still open at the end of input are
//! force-closed.

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

pub use aggregator::{build, build_with_report, BuildReport};
pub use parser::{classify, ClassifiedEvent, EventKind, ExecutionTrace, TraceSpan};
