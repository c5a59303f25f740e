// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use twinflow_aggregators::Uniq;
use twinflow_test_utils::{assert_completed, run_aggregator};

#[test]
fn test_uniq_collapses_duplicate_at_boundary() {
    let (output, report) = run_aggregator(&mut Uniq::new(), "a\nb\n", "b\nc\n");

    assert_eq!(output, "a\nb\nc\n");
    assert_completed(&report);
}

#[test]
fn test_uniq_keeps_non_adjacent_repeats() {
    let (output, _) = run_aggregator(&mut Uniq::new(), "a\nb\n", "a\n");

    assert_eq!(output, "a\nb\na\n");
}

#[test]
fn test_uniq_collapses_runs_within_an_input() {
    let (output, _) = run_aggregator(&mut Uniq::new(), "x\nx\nx\n", "x\n");

    assert_eq!(output, "x\n");
}

#[test]
fn test_uniq_empty_lines_are_records() {
    let (output, _) = run_aggregator(&mut Uniq::new(), "\n\n", "\nz\n");

    assert_eq!(output, "\nz\n");
}

#[test]
fn test_uniq_both_empty_writes_nothing() {
    let (output, report) = run_aggregator(&mut Uniq::new(), "", "");

    assert_eq!(output, "");
    assert_completed(&report);
}
