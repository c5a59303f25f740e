// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io::Cursor;
use twinflow::prelude::*;
use twinflow::{ChannelStatus, Outcome};
use twinflow_test_utils::SharedBuffer;

/// Emits the lines of both inputs alternately, one from each in turn.
struct Interleave;

impl Aggregator for Interleave {
    fn name(&self) -> &str {
        "interleave"
    }

    fn aggregate(&mut self, ctx: &AggregateContext<'_>) -> twinflow::Result<()> {
        let mut open = [true, true];
        while open.iter().any(|&o| o) {
            for (slot, input) in ctx.inputs().into_iter().enumerate() {
                if !open[slot] {
                    continue;
                }
                match input.read_line()? {
                    Some(line) => ctx.output().write_line(&line)?,
                    None => open[slot] = false,
                }
            }
        }
        Ok(())
    }
}

#[test]
fn test_custom_aggregator_through_harness() -> anyhow::Result<()> {
    // Arrange
    let sink = SharedBuffer::new();
    let harness = Harness::from_channels(
        Box::new(Interleave),
        InputChannel::new(InputId::Input1, Cursor::new("a1\na2\na3\n")),
        InputChannel::new(InputId::Input2, Cursor::new("b1\n")),
        OutputChannel::new(sink.clone()),
        FailurePolicy::Stop,
    )?;

    // Act
    let report = harness.run()?;

    // Assert
    assert_eq!(sink.as_string(), "a1\nb1\na2\na3\n");
    assert!(matches!(report.outcome, Outcome::Completed));
    assert!(report.unconsumed.is_empty());
    Ok(())
}

#[test]
fn test_output_is_visible_before_inputs_end() -> anyhow::Result<()> {
    // Arrange
    let sink = SharedBuffer::new();
    let observed = sink.clone();
    let input1 = InputChannel::new(InputId::Input1, Cursor::new("x\ny\n"));
    let input2 = InputChannel::new(InputId::Input2, Cursor::new("z\n"));
    let output = OutputChannel::new(sink);
    let ctx = AggregateContext::new(&input1, &input2, &output)?;
    let mut seen_mid_stream = String::new();

    // Act
    let mut probe = from_fn("probe", |ctx| {
        let first = ctx.input1().read_line()?.unwrap_or_default();
        ctx.output().write_line(&first)?;
        seen_mid_stream = observed.flushed_string();
        ctx.input1().drain()?;
        ctx.input2().drain()?;
        Ok(())
    });
    let report = aggregate(&mut probe, &ctx, FailurePolicy::Stop);

    // Assert
    assert!(report.is_completed());
    assert_eq!(seen_mid_stream, "x\n");
    assert_eq!(input1.status(), ChannelStatus::Exhausted);
    assert_eq!(input2.status(), ChannelStatus::Exhausted);
    Ok(())
}
