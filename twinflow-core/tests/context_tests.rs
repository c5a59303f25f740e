// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io;
use twinflow_core::{AggregateContext, AggregateError, InputId, OutputChannel};
use twinflow_test_utils::{memory_input, TestChannels};

#[test]
fn test_accessors_return_the_same_channel() {
    let channels = TestChannels::new("a\n", "b\n");
    let ctx = channels.context();

    assert!(std::ptr::eq(ctx.input1(), ctx.input1()));
    assert!(std::ptr::eq(ctx.input2(), ctx.input2()));
    assert!(std::ptr::eq(ctx.output(), ctx.output()));
    assert!(std::ptr::eq(ctx.input1(), &channels.input1));
    assert!(std::ptr::eq(ctx.input(InputId::Input2), ctx.input2()));
}

#[test]
fn test_cursor_persists_across_accessor_calls() -> anyhow::Result<()> {
    let channels = TestChannels::new("1\n2\n3\n", "");
    let ctx = channels.context();

    assert_eq!(ctx.input1().read_line()?, Some(b"1".to_vec()));
    assert_eq!(ctx.input1().read_line()?, Some(b"2".to_vec()));
    // A copied context shares the channels too
    let copy = ctx;
    assert_eq!(copy.input1().read_line()?, Some(b"3".to_vec()));
    assert_eq!(ctx.input1().read_line()?, None);
    Ok(())
}

#[test]
fn test_output_position_persists_across_accessor_calls() -> anyhow::Result<()> {
    let channels = TestChannels::new("", "");
    let ctx = channels.context();

    ctx.output().write_fragment(b"a")?;
    ctx.output().write_fragment(b"b")?;

    assert_eq!(channels.output_string(), "ab");
    Ok(())
}

#[test]
fn test_rejects_aliased_inputs() {
    let input = memory_input(InputId::Input1, b"");
    let output = OutputChannel::new(io::sink());

    let result = AggregateContext::new(&input, &input, &output);

    assert!(matches!(result, Err(AggregateError::InvalidState { .. })));
}

#[test]
fn test_rejects_swapped_inputs() {
    let input1 = memory_input(InputId::Input1, b"");
    let input2 = memory_input(InputId::Input2, b"");
    let output = OutputChannel::new(io::sink());

    let result = AggregateContext::new(&input2, &input1, &output);

    assert!(matches!(result, Err(AggregateError::InvalidState { .. })));
}

#[test]
fn test_accessors_work_on_exhausted_channels() -> anyhow::Result<()> {
    let channels = TestChannels::new("", "");
    let ctx = channels.context();
    ctx.input1().drain()?;
    ctx.input2().drain()?;

    // Still usable references; end of data is visible through the status
    assert!(ctx.input1().is_exhausted());
    assert!(ctx.input2().is_exhausted());
    assert_eq!(ctx.input1().read_line()?, None);
    Ok(())
}
