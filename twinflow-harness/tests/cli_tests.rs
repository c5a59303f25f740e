// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use twinflow_aggregators::AggregatorSpec;
use twinflow_core::{AggregateError, FailurePolicy, FlushPolicy};
use twinflow_harness::{Cli, InputSource, OutputSink};

fn parse(args: &[&str]) -> anyhow::Result<Cli> {
    Ok(Cli::try_parse_from(
        std::iter::once("twinflow").chain(args.iter().copied()),
    )?)
}

#[test]
fn test_concat_defaults() -> anyhow::Result<()> {
    // Act
    let config = parse(&["concat", "a.txt", "-"])?.into_config()?;

    // Assert
    assert_eq!(config.aggregator, AggregatorSpec::Concat);
    assert_eq!(config.input1, InputSource::Path(PathBuf::from("a.txt")));
    assert_eq!(config.input2, InputSource::Stdin);
    assert_eq!(config.output, OutputSink::Stdout);
    assert_eq!(config.flush_policy, FlushPolicy::EveryFragment);
    assert_eq!(config.failure_policy, FailurePolicy::Stop);
    Ok(())
}

#[test]
fn test_merge_flags() -> anyhow::Result<()> {
    let config = parse(&["merge", "-n", "-u", "a", "b"])?.into_config()?;

    assert_eq!(
        config.aggregator,
        AggregatorSpec::Merge {
            numeric: true,
            reverse: false,
            unique: true
        }
    );
    Ok(())
}

#[test]
fn test_head_and_tail_line_counts() -> anyhow::Result<()> {
    let head = parse(&["head", "-n", "3", "a", "b"])?.into_config()?;
    let tail = parse(&["tail", "a", "b"])?.into_config()?;

    assert_eq!(head.aggregator, AggregatorSpec::Head { lines: 3 });
    assert_eq!(tail.aggregator, AggregatorSpec::Tail { lines: 10 });
    Ok(())
}

#[test]
fn test_global_flags() -> anyhow::Result<()> {
    let config = parse(&[
        "--output",
        "out.txt",
        "--flush-on-finish",
        "--annotate-failures",
        "uniq-count",
        "a",
        "b",
    ])?
    .into_config()?;

    assert_eq!(config.aggregator, AggregatorSpec::UniqCount);
    assert_eq!(config.output, OutputSink::Path(PathBuf::from("out.txt")));
    assert_eq!(config.flush_policy, FlushPolicy::OnFinish);
    assert_eq!(config.failure_policy, FailurePolicy::Annotate);
    Ok(())
}

#[test]
fn test_config_file_with_overrides() -> anyhow::Result<()> {
    // Arrange
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("config.json");
    fs::write(
        &file,
        r#"{"input1": {"path": "a"}, "input2": {"path": "b"}, "aggregator": {"kind": "reverse-concat"}}"#,
    )?;
    let file_arg = file.to_string_lossy().into_owned();

    // Act
    let config = parse(&["--config", &file_arg, "--output", "-", "--annotate-failures"])?
        .into_config()?;

    // Assert
    assert_eq!(config.aggregator, AggregatorSpec::ReverseConcat);
    assert_eq!(config.output, OutputSink::Stdout);
    assert_eq!(config.failure_policy, FailurePolicy::Annotate);
    Ok(())
}

#[test]
fn test_missing_command_is_configuration_error() -> anyhow::Result<()> {
    let result = parse(&[])?.into_config();

    assert!(matches!(result, Err(AggregateError::Configuration { .. })));
    Ok(())
}

#[test]
fn test_config_and_command_conflict() -> anyhow::Result<()> {
    let result = parse(&["--config", "c.json", "wc", "a", "b"])?.into_config();

    assert!(matches!(result, Err(AggregateError::Configuration { .. })));
    Ok(())
}

#[test]
fn test_unknown_command_is_rejected() {
    assert!(parse(&["shuffle", "a", "b"]).is_err());
}

#[test]
fn test_missing_inputs_are_rejected() {
    assert!(parse(&["wc", "a"]).is_err());
}
