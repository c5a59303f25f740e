// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The aggregation entry point.
//!
//! [`aggregate`] is the only way the harness runs an aggregator. It never
//! returns an error and never lets a panic escape: whatever goes wrong inside
//! the aggregator ends up in the returned [`AggregateReport`].

use crate::aggregator::Aggregator;
use crate::channel_status::{ChannelStatus, InputId};
use crate::context::AggregateContext;
use crate::input_channel::InputStats;
use crate::output_channel::OutputStats;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use twinflow_error::AggregateError;

/// What the entry point does with the output after an aggregation failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop and keep whatever was already written
    #[default]
    Stop,
    /// Also append one diagnostic line, if the output is still writable
    Annotate,
}

/// How an invocation ended.
#[derive(Debug, Clone)]
pub enum Outcome {
    Completed,
    Failed(AggregateError),
}

impl Outcome {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    #[must_use]
    pub const fn error(&self) -> Option<&AggregateError> {
        match self {
            Self::Completed => None,
            Self::Failed(e) => Some(e),
        }
    }
}

/// Summary of a single aggregation invocation.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    pub aggregator: String,
    pub outcome: Outcome,
    pub input1: InputStats,
    pub input2: InputStats,
    pub output: OutputStats,
    /// Inputs still `Ready` when the aggregator returned
    pub unconsumed: Vec<InputId>,
}

impl AggregateReport {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.outcome.is_completed()
    }
}

/// Run `aggregator` once over the channels of `ctx`.
///
/// Errors returned by the aggregator and panics raised inside it are caught,
/// logged, and recorded in the report. With [`FailurePolicy::Annotate`] a line
/// of the form `twinflow: <name>: <error>` is appended to the output.
///
/// Returning is the completion signal: the caller finalizes the output only
/// after this function returns.
///
/// # Examples
///
/// ```
/// use std::io::{self, Cursor};
/// use twinflow_core::{aggregate, from_fn, AggregateContext, FailurePolicy};
/// use twinflow_core::{InputChannel, InputId, OutputChannel};
///
/// let input1 = InputChannel::new(InputId::Input1, Cursor::new(""));
/// let input2 = InputChannel::new(InputId::Input2, Cursor::new(""));
/// let output = OutputChannel::new(io::sink());
/// let ctx = AggregateContext::new(&input1, &input2, &output).unwrap();
///
/// let mut broken = from_fn("broken", |_| panic!("boom"));
/// let report = aggregate(&mut broken, &ctx, FailurePolicy::Stop);
/// assert!(!report.is_completed());
/// ```
pub fn aggregate<A>(
    aggregator: &mut A,
    ctx: &AggregateContext<'_>,
    policy: FailurePolicy,
) -> AggregateReport
where
    A: Aggregator + ?Sized,
{
    let name = aggregator.name().to_string();
    debug!("aggregation {} started", name);

    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| aggregator.aggregate(ctx))) {
        Ok(Ok(())) => Outcome::Completed,
        Ok(Err(e)) => Outcome::Failed(e),
        Err(payload) => Outcome::Failed(AggregateError::aggregator_panic(panic_message(
            payload.as_ref(),
        ))),
    };

    if let Outcome::Failed(e) = &outcome {
        if e.is_recoverable() {
            warn!("aggregation {} stopped on bad data: {}", name, e);
        } else {
            error!("aggregation {} failed: {}", name, e);
        }
        if policy == FailurePolicy::Annotate {
            annotate(ctx, &name, e);
        }
    }

    let unconsumed: Vec<InputId> = ctx
        .inputs()
        .iter()
        .filter(|input| input.status() == ChannelStatus::Ready)
        .map(|input| input.id())
        .collect();
    if outcome.is_completed() && !unconsumed.is_empty() {
        warn!(
            "aggregation {} returned without reaching the end of {:?}",
            name, unconsumed
        );
    }

    let report = AggregateReport {
        aggregator: name,
        outcome,
        input1: ctx.input1().stats(),
        input2: ctx.input2().stats(),
        output: ctx.output().stats(),
        unconsumed,
    };
    debug!(
        "aggregation {} finished: {} bytes in, {} bytes out",
        report.aggregator,
        report.input1.bytes_read + report.input2.bytes_read,
        report.output.bytes_written
    );
    report
}

fn annotate(ctx: &AggregateContext<'_>, name: &str, error: &AggregateError) {
    let line = format!("twinflow: {name}: {error}");
    if let Err(e) = ctx.output().write_line(line.as_bytes()) {
        debug!("could not annotate output: {}", e);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
