use apex_trace_studio::commands::{execute_parse, read_log, validate_args, ParseArgs};
use apex_trace_studio::output::read_trace;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample.log")
}

#[test]
fn test_validate_args_valid() {
    let args = ParseArgs {
        input: fixture(),
        ..Default::default()
    };

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_empty_input() {
    let args = ParseArgs::default();
    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_input_is_directory() {
    let dir = tempfile::tempdir().unwrap();
    let args = ParseArgs {
        input: dir.path().to_path_buf(),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_output_is_directory() {
    let dir = tempfile::tempdir().unwrap();
    let args = ParseArgs {
        input: fixture(),
        output_json: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_top_zero() {
    let args = ParseArgs {
        input: fixture(),
        top_events: 0,
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_top_too_large() {
    let args = ParseArgs {
        input: fixture(),
        top_events: 2000,
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_read_log_missing_file() {
    assert!(read_log(&PathBuf::from("no/such/file.log")).is_err());
}

#[test]
fn test_execute_parse_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("trace.json");

    let args = ParseArgs {
        input: fixture(),
        output_json: Some(output.clone()),
        print_tree: true,
        print_summary: true,
        ..Default::default()
    };

    validate_args(&args).unwrap();
    execute_parse(args).unwrap();

    let trace = read_trace(&output).unwrap();
    assert_eq!(trace.len(), 1);
    assert_eq!(trace.span_count(), 10);
}
