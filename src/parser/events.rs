//! Fixed event vocabulary of the Apex execution log.
//!
//! These tables encode an external, versioned log grammar. They decide
//! which event codes open a span, which close one, and which pipe
//! fields make up the human-readable detail of a line.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Structural role of a classified line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Opens a span (e.g. `METHOD_ENTRY`)
    Start,
    /// Closes the innermost open span (e.g. `METHOD_EXIT`)
    End,
    /// Carries information without changing nesting
    Leaf,
}

/// Event codes that open a span
pub const START_EVENTS: &[&str] = &[
    "CALLOUT_REQUEST",
    "CODE_UNIT_STARTED",
    "CONSTRUCTOR_ENTRY",
    "CUMULATIVE_LIMIT_USAGE",
    "CUMULATIVE_PROFILING_BEGIN",
    "DML_BEGIN",
    "EXECUTION_STARTED",
    "FLOW_ELEMENT_BEGIN",
    "FLOW_START_INTERVIEW_BEGIN",
    "FLOW_START_INTERVIEWS_BEGIN",
    "METHOD_ENTRY",
    "SOQL_EXECUTE_BEGIN",
    "SOSL_EXECUTE_BEGIN",
    "SYSTEM_CONSTRUCTOR_ENTRY",
    "SYSTEM_METHOD_ENTRY",
    "SYSTEM_MODE_ENTER",
    "VALIDATION_RULE",
    "VF_DESERIALIZE_VIEWSTATE_BEGIN",
    "VF_EVALUATE_FORMULA_BEGIN",
    "VF_SERIALIZE_VIEWSTATE_BEGIN",
    "WF_ACTION",
    "WF_CRITERIA_BEGIN",
    "WF_FLOW_ACTION_BEGIN",
    "WF_RULE_EVAL_BEGIN",
];

/// Event codes that close the innermost open span
pub const END_EVENTS: &[&str] = &[
    "CALLOUT_RESPONSE",
    "CODE_UNIT_FINISHED",
    "CONSTRUCTOR_EXIT",
    "CUMULATIVE_LIMIT_USAGE_END",
    "CUMULATIVE_PROFILING_END",
    "DML_END",
    "EXECUTION_FINISHED",
    "FLOW_ELEMENT_END",
    "FLOW_START_INTERVIEW_END",
    "FLOW_START_INTERVIEWS_END",
    "METHOD_EXIT",
    "SOQL_EXECUTE_END",
    "SOSL_EXECUTE_END",
    "SYSTEM_CONSTRUCTOR_EXIT",
    "SYSTEM_METHOD_EXIT",
    "SYSTEM_MODE_EXIT",
    "VALIDATION_FAIL",
    "VALIDATION_PASS",
    "VF_DESERIALIZE_VIEWSTATE_END",
    "VF_EVALUATE_FORMULA_END",
    "VF_SERIALIZE_VIEWSTATE_END",
    "WF_ACTIONS_END",
    "WF_CRITERIA_END",
    "WF_FLOW_ACTION_END",
    "WF_RULE_EVAL_END",
];

/// Start code whose label is kept whole instead of losing its last segment
pub const UNSTRIPPED_START_EVENT: &str = "WF_ACTION";

static START_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| START_EVENTS.iter().copied().collect());

static END_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| END_EVENTS.iter().copied().collect());

/// Classify an event code against the START and END tables
pub fn kind_of(event_code: &str) -> EventKind {
    if START_SET.contains(event_code) {
        EventKind::Start
    } else if END_SET.contains(event_code) {
        EventKind::End
    } else {
        EventKind::Leaf
    }
}

/// Derive the label shared by a span's opening and closing lines
///
/// Only start codes are shortened, by cutting at the rightmost `_`:
/// `METHOD_ENTRY` becomes `METHOD`, `CODE_UNIT_STARTED` becomes `CODE_UNIT`.
pub fn base_event_code(event_code: &str, kind: EventKind) -> &str {
    if kind != EventKind::Start || event_code == UNSTRIPPED_START_EVENT {
        return event_code;
    }

    match event_code.rfind('_') {
        Some(idx) => &event_code[..idx],
        None => event_code,
    }
}

/// Pipe field indices that form the detail string of an event code
///
/// Returns `None` for codes without a dedicated mapping; those fall back
/// to the last field of the line.
pub fn detail_fields(event_code: &str) -> Option<&'static [usize]> {
    const DML_FIELDS: &[usize] = &[3, 4, 5];
    const THIRD_FIELD: &[usize] = &[3];
    const SECOND_FIELD: &[usize] = &[2];

    match event_code {
        "DML_BEGIN" => Some(DML_FIELDS),
        "WF_CRITERIA_BEGIN" => Some(THIRD_FIELD),
        "WF_FORMULA" | "LIMIT_USAGE_FOR_NS" => Some(SECOND_FIELD),
        _ => None,
    }
}
