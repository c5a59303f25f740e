// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::test_channels::TestChannels;
use twinflow_core::{aggregate, AggregateReport, Aggregator, ChannelStatus, FailurePolicy};

/// Run `aggregator` once over two in-memory inputs and return what it wrote.
pub fn run_aggregator<A>(
    aggregator: &mut A,
    input1: &str,
    input2: &str,
) -> (String, AggregateReport)
where
    A: Aggregator + ?Sized,
{
    let channels = TestChannels::new(input1, input2);
    let report = run_on(aggregator, &channels, FailurePolicy::Stop);
    (channels.output_string(), report)
}

/// Run `aggregator` once over prepared channels.
pub fn run_on<A>(
    aggregator: &mut A,
    channels: &TestChannels,
    policy: FailurePolicy,
) -> AggregateReport
where
    A: Aggregator + ?Sized,
{
    aggregate(aggregator, &channels.context(), policy)
}

/// Assert the invocation completed and observed the end of both inputs.
///
/// # Panics
///
/// If the report carries a failure or an unconsumed input.
pub fn assert_completed(report: &AggregateReport) {
    assert!(
        report.is_completed(),
        "expected {} to complete, got {:?}",
        report.aggregator,
        report.outcome
    );
    assert!(
        report.unconsumed.is_empty(),
        "expected {} to consume both inputs, left {:?}",
        report.aggregator,
        report.unconsumed
    );
}

/// Assert both inputs of `channels` reached their end.
///
/// # Panics
///
/// If either input is not exhausted.
pub fn assert_inputs_exhausted(channels: &TestChannels) {
    assert_eq!(channels.input1.status(), ChannelStatus::Exhausted);
    assert_eq!(channels.input2.status(), ChannelStatus::Exhausted);
}
