// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::{HarnessConfig, InputSource, OutputSink};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter};
use tracing::{debug, info};
use twinflow_core::{
    aggregate, AggregateContext, AggregateError, AggregateReport, Aggregator, ChannelStatus,
    FailurePolicy, FlushPolicy, InputChannel, InputId, OutputChannel, Result,
};

/// Owns the channels and runs one aggregator over them, exactly once.
///
/// [`run`](Self::run) consumes the harness, so a second invocation cannot be
/// expressed. The output is finished only after the aggregator has returned.
pub struct Harness {
    aggregator: Box<dyn Aggregator + Send>,
    input1: InputChannel,
    input2: InputChannel,
    output: OutputChannel,
    failure_policy: FailurePolicy,
}

impl Harness {
    /// Validate `config`, open its sources and sink, and build its aggregator.
    ///
    /// # Errors
    /// Returns `AggregateError::Configuration` for an invalid configuration,
    /// `AggregateError::InputFailed` if an input file cannot be opened and
    /// `AggregateError::OutputFailed` if the output file cannot be created.
    pub fn open(config: &HarnessConfig) -> Result<Self> {
        config.validate()?;

        let input1 = open_input(InputId::Input1, &config.input1)?;
        let input2 = open_input(InputId::Input2, &config.input2)?;
        let output = open_output(&config.output, config.flush_policy)?;
        debug!(
            "opened {:?} and {:?} for {}",
            config.input1,
            config.input2,
            config.aggregator.kind()
        );

        Self::from_channels(
            config.aggregator.build(),
            input1,
            input2,
            output,
            config.failure_policy,
        )
    }

    /// Run `aggregator` over channels the caller already opened.
    ///
    /// # Errors
    /// Returns `AggregateError::InvalidState` if the inputs are not identified
    /// as input1 and input2 respectively.
    pub fn from_channels(
        aggregator: Box<dyn Aggregator + Send>,
        input1: InputChannel,
        input2: InputChannel,
        output: OutputChannel,
        failure_policy: FailurePolicy,
    ) -> Result<Self> {
        AggregateContext::new(&input1, &input2, &output)?;
        Ok(Self {
            aggregator,
            input1,
            input2,
            output,
            failure_policy,
        })
    }

    /// Invoke the aggregator once, then flush and close the output.
    ///
    /// An aggregation failure is not an error here: it is recorded in the
    /// returned report, and the output keeps whatever was written before it.
    ///
    /// A sink that already failed while the aggregator ran is not finished
    /// again: its failure is part of the report.
    ///
    /// # Errors
    /// Returns `AggregateError::OutputFailed` if the final flush fails, or
    /// `AggregateError::MultipleErrors` holding the aggregation failure and the
    /// flush failure when both happened.
    pub fn run(self) -> Result<AggregateReport> {
        let Self {
            mut aggregator,
            input1,
            input2,
            output,
            failure_policy,
        } = self;

        let mut report = {
            let ctx = AggregateContext::new(&input1, &input2, &output)?;
            aggregate(&mut aggregator, &ctx, failure_policy)
        };

        let failed_before_finish = output.status() == ChannelStatus::Failed;
        match output.finish() {
            Ok(stats) => report.output = stats,
            Err(e) if failed_before_finish => debug!("output not finished: {}", e),
            Err(e) => {
                return Err(match report.outcome.error() {
                    Some(failure) => AggregateError::multiple(vec![failure.clone(), e]),
                    None => e,
                })
            }
        }
        info!(
            "{} {}: read {} + {} bytes, wrote {} bytes",
            report.aggregator,
            if report.is_completed() { "completed" } else { "failed" },
            report.input1.bytes_read,
            report.input2.bytes_read,
            report.output.bytes_written
        );
        Ok(report)
    }
}

impl fmt::Debug for Harness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("aggregator", &self.aggregator.name())
            .field("input1", &self.input1)
            .field("input2", &self.input2)
            .field("output", &self.output)
            .field("failure_policy", &self.failure_policy)
            .finish()
    }
}

fn open_input(id: InputId, source: &InputSource) -> Result<InputChannel> {
    match source {
        InputSource::Stdin => Ok(InputChannel::from_reader(id, io::stdin())),
        InputSource::Path(path) => File::open(path)
            .map(|file| InputChannel::from_reader(id, file))
            .map_err(|e| {
                AggregateError::input_failed(
                    id.as_str(),
                    format!("cannot open {}: {e}", path.display()),
                )
            }),
    }
}

fn open_output(sink: &OutputSink, policy: FlushPolicy) -> Result<OutputChannel> {
    match sink {
        OutputSink::Stdout => Ok(OutputChannel::with_flush_policy(
            BufWriter::new(io::stdout()),
            policy,
        )),
        OutputSink::Path(path) => File::create(path)
            .map(|file| OutputChannel::with_flush_policy(BufWriter::new(file), policy))
            .map_err(|e| {
                AggregateError::output_failed(format!("cannot create {}: {e}", path.display()))
            }),
    }
}
