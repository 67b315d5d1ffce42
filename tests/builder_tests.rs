use apex_trace_studio::aggregator::{build, build_with_report};
use apex_trace_studio::parser::{ExecutionTrace, TraceSpan};
use pretty_assertions::assert_eq;

const SAMPLE: &str = include_str!("fixtures/sample.log");

const SCENARIO: &str = "\
09:00:00.001 (1)|CODE_UNIT_STARTED|[EXTERNAL]|Test
09:00:00.002 (2)|METHOD_ENTRY|[1]|a()
09:00:00.003 (3)|METHOD_EXIT|[1]|a()
09:00:00.004 (4)|CODE_UNIT_FINISHED|Test";

/// Tree shape with codes and details, ignoring line numbers
#[derive(Debug, PartialEq)]
struct Shape {
    code: String,
    detail: String,
    children: Vec<Shape>,
}

fn shape(spans: &[TraceSpan]) -> Vec<Shape> {
    spans
        .iter()
        .map(|s| Shape {
            code: s.event_code.clone(),
            detail: s.detail.clone(),
            children: shape(&s.children),
        })
        .collect()
}

fn assert_children_ordered(trace: &ExecutionTrace) {
    for span in trace.iter() {
        let lines: Vec<usize> = span.children.iter().map(|c| c.line_number).collect();
        assert!(
            lines.windows(2).all(|w| w[0] < w[1]),
            "children of line {} out of order: {:?}",
            span.line_number,
            lines
        );
    }
}

#[test]
fn test_concrete_scenario() {
    let trace = build(SCENARIO);

    assert_eq!(trace.len(), 1);
    let unit = &trace.spans()[0];
    assert_eq!(unit.base_event_code, "CODE_UNIT");
    assert_eq!(unit.line_number, 0);
    assert!(!unit.unterminated);
    assert_eq!(unit.children.len(), 1);

    let method = &unit.children[0];
    assert_eq!(method.base_event_code, "METHOD");
    assert_eq!(method.line_number, 1);
    assert!(method.children.is_empty());
}

#[test]
fn test_concrete_truncation_scenario() {
    let truncated = SCENARIO.lines().take(3).collect::<Vec<_>>().join("\n");
    let (trace, report) = build_with_report(&truncated);

    assert_eq!(trace.len(), 1);
    let unit = &trace.spans()[0];
    assert_eq!(unit.base_event_code, "CODE_UNIT");
    assert!(unit.unterminated);
    assert_eq!(unit.children.len(), 1);
    assert_eq!(unit.children[0].base_event_code, "METHOD");
    assert_eq!(report.force_closed, 1);
}

#[test]
fn test_sample_log_structure() {
    let (trace, report) = build_with_report(SAMPLE);

    assert_eq!(trace.len(), 1);
    let execution = &trace.spans()[0];
    assert_eq!(execution.base_event_code, "EXECUTION");
    assert_eq!(execution.line_number, 1);

    let unit = &execution.children[0];
    assert_eq!(unit.base_event_code, "CODE_UNIT");
    assert_eq!(unit.detail, "execute_anonymous_apex");

    let codes: Vec<&str> = unit.children.iter().map(|s| s.base_event_code.as_str()).collect();
    assert_eq!(codes, vec!["METHOD", "CUMULATIVE_LIMIT"]);

    let method_children: Vec<&str> = unit.children[0]
        .children
        .iter()
        .map(|s| s.base_event_code.as_str())
        .collect();
    assert_eq!(method_children, vec!["USER_DEBUG", "DML", "SOQL_EXECUTE"]);
    assert_eq!(unit.children[0].children[1].detail, "Op:Insert | Type:Account | Rows:1");

    let limits = &unit.children[1];
    let limit_children: Vec<(&str, &str)> = limits
        .children
        .iter()
        .map(|s| (s.base_event_code.as_str(), s.detail.as_str()))
        .collect();
    assert_eq!(
        limit_children,
        vec![
            ("LIMIT_USAGE_FOR_NS", "(default)"),
            ("SOQL queries", ": 1 out of 100"),
            ("CPU time", ": 24 out of 10000"),
        ]
    );

    assert_eq!(report.lines_read, 19);
    assert_eq!(report.blank_lines, 2);
    assert_eq!(report.dropped_lines, 1);
    assert!(report.is_balanced());
    assert_eq!(trace.max_depth(), 4);
}

#[test]
fn test_balanced_span_count() {
    // Every Start/End pair collapses into one span; leaves map one to one
    let trace = build(SAMPLE);
    let starts = 6;
    let leaves = 4;

    assert_eq!(trace.span_count(), starts + leaves);
    assert_children_ordered(&trace);
}

#[test]
fn test_truncation_keeps_every_open_span() {
    let lines: Vec<&str> = SAMPLE.lines().collect();
    // Cut right after the DML_BEGIN line
    let truncated = lines[..6].join("\n");
    let (trace, report) = build_with_report(&truncated);

    assert_eq!(report.force_closed, 4);
    let open: Vec<&str> = trace
        .iter()
        .filter(|s| s.unterminated)
        .map(|s| s.base_event_code.as_str())
        .collect();
    assert_eq!(open, vec!["EXECUTION", "CODE_UNIT", "METHOD", "DML"]);

    let method = &trace.spans()[0].children[0].children[0];
    assert_eq!(method.children.len(), 2);
    assert_eq!(method.children[0].base_event_code, "USER_DEBUG");
}

#[test]
fn test_reparse_is_identical() {
    assert_eq!(build(SAMPLE), build(SAMPLE));
}

#[test]
fn test_metric_line_is_isolated_leaf() {
    let trace = build("  Number of SOQL queries: 5");

    assert_eq!(trace.len(), 1);
    let span = &trace.spans()[0];
    assert_eq!(span.base_event_code, "SOQL queries");
    assert_eq!(span.detail, ": 5");
    assert!(span.is_leaf());
}

#[test]
fn test_metric_line_does_not_change_nesting() {
    let log = "\
09:00:00.001 (1)|METHOD_ENTRY|[1]|a()
  Maximum heap size: 0 out of 6000000
09:00:00.002 (2)|METHOD_EXIT|[1]|a()
09:00:00.003 (3)|USER_DEBUG|[2]|DEBUG|after";
    let trace = build(log);

    assert_eq!(trace.len(), 2);
    assert_eq!(trace.spans()[0].children.len(), 1);
    assert_eq!(trace.spans()[0].children[0].base_event_code, "heap size");
    assert_eq!(trace.spans()[1].base_event_code, "USER_DEBUG");
}

#[test]
fn test_blank_lines_are_transparent() {
    let spaced: String = SCENARIO
        .lines()
        .flat_map(|line| ["", line, "   "])
        .collect::<Vec<_>>()
        .join("\n");

    let plain = build(SCENARIO);
    let with_blanks = build(&spaced);

    assert_eq!(shape(plain.spans()), shape(with_blanks.spans()));
    assert_children_ordered(&with_blanks);
}

#[test]
fn test_crlf_line_endings() {
    let crlf = SCENARIO.replace('\n', "\r\n");
    assert_eq!(build(&crlf), build(SCENARIO));
}

#[test]
fn test_stray_end_does_not_disturb_later_spans() {
    let log = "\
09:00:00.001 (1)|METHOD_EXIT|[1]|orphan()
09:00:00.002 (2)|METHOD_ENTRY|[1]|a()
09:00:00.003 (3)|USER_DEBUG|[2]|DEBUG|inside
09:00:00.004 (4)|METHOD_EXIT|[1]|a()";
    let (trace, report) = build_with_report(log);

    assert_eq!(report.stray_ends, 1);
    assert_eq!(trace.len(), 2);
    assert_eq!(trace.spans()[0].event_code, "METHOD_EXIT");
    assert!(trace.spans()[0].is_leaf());
    assert_eq!(trace.spans()[1].base_event_code, "METHOD");
    assert_eq!(trace.spans()[1].children.len(), 1);
}

#[test]
fn test_extra_end_after_balanced_block() {
    let log = format!("{}\n09:00:00.005 (5)|CODE_UNIT_FINISHED|Test", SCENARIO);
    let (trace, report) = build_with_report(&log);

    assert_eq!(trace.len(), 2);
    assert_eq!(trace.spans()[1].event_code, "CODE_UNIT_FINISHED");
    assert_eq!(report.stray_ends, 1);
}

#[test]
fn test_mismatched_end_closes_innermost_span() {
    let log = "\
09:00:00.001 (1)|CODE_UNIT_STARTED|[EXTERNAL]|Test
09:00:00.002 (2)|METHOD_ENTRY|[1]|a()
09:00:00.003 (3)|CODE_UNIT_FINISHED|Test";
    let (trace, report) = build_with_report(log);

    // CODE_UNIT_FINISHED closes METHOD; CODE_UNIT is force-closed
    assert_eq!(trace.len(), 1);
    assert!(trace.spans()[0].unterminated);
    assert!(!trace.spans()[0].children[0].unterminated);
    assert_eq!(report.force_closed, 1);
}

#[test]
fn test_garbage_input_never_panics() {
    let inputs = [
        "",
        "\n\n\n",
        "|||||",
        "not a log at all",
        "09:00:00.001|",
        "  number of",
        "99:99:99.999 (1)|METHOD_ENTRY",
        "09:00:00.001 (1)|METHOD_EXIT\n09:00:00.001 (1)|METHOD_EXIT",
        "ÿ|é|ü",
    ];

    for input in inputs {
        let trace = build(input);
        assert!(trace.span_count() <= input.lines().count());
    }
}

/// `depth` nested METHOD_ENTRY lines, closed again only when `balanced`
fn nested(depth: usize, balanced: bool) -> String {
    let mut log = Vec::with_capacity(depth * 2);
    for i in 0..depth {
        log.push(format!("09:00:00.001 ({})|METHOD_ENTRY|[1]|m{}()", i, i));
    }
    if balanced {
        for i in (0..depth).rev() {
            log.push(format!("09:00:00.002 ({})|METHOD_EXIT|[1]|m{}()", i, i));
        }
    }
    log.join("\n")
}

#[test]
fn test_deep_nesting() {
    let depth = 500;
    let trace = build(&nested(depth, true));

    assert_eq!(trace.len(), 1);
    assert_eq!(trace.max_depth(), depth);
    assert_eq!(trace.span_count(), depth);
}

#[test]
fn test_very_deep_truncated_log_builds_compares_and_drops() {
    let depth = 200_000;
    let log = nested(depth, false);
    let (trace, report) = build_with_report(&log);

    assert_eq!(report.force_closed, depth);
    assert_eq!(trace.len(), 1);
    assert_eq!(trace.max_depth(), depth);
    assert_eq!(trace.span_count(), depth);
    assert!(trace.iter().all(|span| span.unterminated));

    let again = build(&log);
    assert!(trace == again);

    drop(again);
    drop(trace);
}
