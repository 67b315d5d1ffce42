//! Per-line classification of raw Apex log text.
//!
//! A structural line looks like
//! `HH:mm:ss.fff (NANOS)|EVENT_CODE|field2|field3|...`.
//! Aggregate limit lines (`  Number of X: n`, `  Maximum X: n`) form a
//! separate sub-format without timestamp or pipes.

use super::events::{base_event_code, detail_fields, kind_of, EventKind};
use crate::utils::config::{
    DETAIL_JOINER, FIELD_SEPARATOR, METRIC_PREFIXES, REFERENCE_DAY, REFERENCE_MONTH,
    REFERENCE_YEAR, TIMESTAMP_FORMAT, TIMESTAMP_LEN,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::trace;

/// One recognised log line
///
/// **Public** - consumed by the trace builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEvent {
    /// Time of day pinned to the reference date
    pub timestamp: NaiveDateTime,

    /// Event code exactly as written in the log
    pub event_code: String,

    /// Event code with the start suffix removed
    pub base_event_code: String,

    /// Human-readable detail assembled from the pipe fields
    pub detail: String,

    pub kind: EventKind,

    /// Zero-based position of the line in the document
    pub line_number: usize,
}

/// Classify one raw log line
///
/// **Public** - main entry point of the line classifier
///
/// # Arguments
/// * `raw_line` - Line text without its terminator
/// * `line_number` - Zero-based position of the line in the document
///
/// # Returns
/// `None` for blank lines and for lines that are neither metric lines nor
/// well-formed structural lines. Such lines are dropped by the caller.
pub fn classify(raw_line: &str, line_number: usize) -> Option<ClassifiedEvent> {
    if raw_line.trim().is_empty() {
        return None;
    }

    if let Some(event) = classify_metric(raw_line, line_number) {
        return Some(event);
    }

    let fields = split_fields(raw_line);
    if fields.len() < 2 {
        trace!("Line {}: no event code, dropping", line_number);
        return None;
    }

    let time_token = fields[0].split(' ').next().unwrap_or_default();
    let Some(timestamp) = parse_timestamp(time_token) else {
        trace!("Line {}: unparsable timestamp '{}', dropping", line_number, time_token);
        return None;
    };

    let event_code = fields[1];
    let kind = kind_of(event_code);

    Some(ClassifiedEvent {
        timestamp,
        event_code: event_code.to_string(),
        base_event_code: base_event_code(event_code, kind).to_string(),
        detail: extract_detail(event_code, &fields),
        kind,
        line_number,
    })
}

/// Parse an `HH:mm:ss.fff` token onto the reference date
///
/// **Public** - exposed for callers that display raw timestamps
///
/// The token must have exactly that shape: two-digit fields and exactly
/// three fractional digits.
pub fn parse_timestamp(token: &str) -> Option<NaiveDateTime> {
    if !has_timestamp_shape(token) {
        return None;
    }

    let time = NaiveTime::parse_from_str(token, TIMESTAMP_FORMAT).ok()?;
    Some(reference_date().and_time(time))
}

/// Timestamp carried by metric lines, which have no time of their own
pub fn metric_timestamp() -> NaiveDateTime {
    reference_date().and_hms_opt(0, 0, 0).unwrap_or_default()
}

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, REFERENCE_MONTH, REFERENCE_DAY).unwrap_or_default()
}

fn has_timestamp_shape(token: &str) -> bool {
    let bytes = token.as_bytes();
    if bytes.len() != TIMESTAMP_LEN {
        return false;
    }

    bytes.iter().enumerate().all(|(i, b)| match i {
        2 | 5 => *b == b':',
        8 => *b == b'.',
        _ => b.is_ascii_digit(),
    })
}

/// Handle `  Number of X: n` / `  Maximum X: n`
///
/// **Private** - short-circuits the structural path in `classify`
fn classify_metric(raw_line: &str, line_number: usize) -> Option<ClassifiedEvent> {
    let prefix_len = METRIC_PREFIXES.iter().find_map(|prefix| {
        raw_line
            .get(..prefix.len())
            .filter(|head| head.eq_ignore_ascii_case(prefix))
            .map(|_| prefix.len())
    })?;

    let rest = &raw_line[prefix_len..];
    let (name, detail) = match rest.find(':') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };

    Some(ClassifiedEvent {
        timestamp: metric_timestamp(),
        event_code: name.to_string(),
        base_event_code: name.to_string(),
        detail: detail.to_string(),
        kind: EventKind::Leaf,
        line_number,
    })
}

/// Split on `|`, dropping trailing empty fields
fn split_fields(raw_line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = raw_line.split(FIELD_SEPARATOR).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Build the detail string for an event code
///
/// Mapped codes join their configured fields, skipping indices past the
/// end of the line. Everything else shows the last field when the line
/// has more than the timestamp and the code.
fn extract_detail(event_code: &str, fields: &[&str]) -> String {
    match detail_fields(event_code) {
        Some(indices) => indices
            .iter()
            .filter_map(|&i| fields.get(i).copied())
            .collect::<Vec<_>>()
            .join(DETAIL_JOINER),
        None if fields.len() > 2 => fields[fields.len() - 1].to_string(),
        None => String::new(),
    }
}
