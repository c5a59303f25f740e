// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use twinflow_aggregators::WordCount;
use twinflow_core::AggregateError;
use twinflow_test_utils::{
    assert_completed, run_aggregator,
    test_data::{wc_counts_a, wc_counts_b},
};

#[test]
fn test_wc_sums_columns() {
    let (output, report) = run_aggregator(&mut WordCount::new(), &wc_counts_a(), &wc_counts_b());

    assert_eq!(output, "      8      32     181\n");
    assert_completed(&report);
}

#[test]
fn test_wc_single_column_is_bare() {
    let (output, _) = run_aggregator(&mut WordCount::new(), "3\n", "4\n");

    assert_eq!(output, "7\n");
}

#[test]
fn test_wc_one_side_empty() {
    let (output, report) = run_aggregator(&mut WordCount::new(), "", "      5      20     111\n");

    assert_eq!(output, "      5      20     111\n");
    assert_completed(&report);
}

#[test]
fn test_wc_blank_lines_are_skipped() {
    let (output, _) = run_aggregator(&mut WordCount::new(), "\n2\n", "  \n1\n");

    assert_eq!(output, "3\n");
}

#[test]
fn test_wc_column_mismatch_is_malformed() {
    let (output, report) = run_aggregator(&mut WordCount::new(), "1 2\n", "3\n");

    assert_eq!(output, "");
    assert!(matches!(
        report.outcome.error(),
        Some(AggregateError::MalformedInput { channel, line: 1, .. }) if channel == "input2"
    ));
}

#[test]
fn test_wc_non_numeric_is_malformed() {
    let (_, report) = run_aggregator(&mut WordCount::new(), "12 total\n", "");

    assert!(matches!(
        report.outcome.error(),
        Some(AggregateError::MalformedInput { channel, .. }) if channel == "input1"
    ));
}

#[test]
fn test_wc_both_empty_writes_nothing() {
    let (output, report) = run_aggregator(&mut WordCount::new(), "", "");

    assert_eq!(output, "");
    assert_completed(&report);
}
