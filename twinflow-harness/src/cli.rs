// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::{HarnessConfig, InputSource, OutputSink};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use twinflow_aggregators::AggregatorSpec;
use twinflow_core::{AggregateError, FailurePolicy, FlushPolicy, Result};

#[derive(Debug, Parser)]
#[command(
    name = "twinflow",
    version,
    about = "Recombine the outputs of a command run on two halves of its input",
    max_term_width = 100
)]
pub struct Cli {
    /// Write the result to PATH instead of standard output
    #[arg(short, long, global = true, value_name = "PATH")]
    pub output: Option<String>,

    /// Flush the output once at the end instead of after every fragment
    #[arg(long, global = true)]
    pub flush_on_finish: bool,

    /// Append a diagnostic line to the output if aggregation fails
    #[arg(long, global = true)]
    pub annotate_failures: bool,

    /// Load the whole invocation from a JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// The two partial outputs to recombine; `-` reads standard input.
#[derive(Debug, Clone, Args)]
pub struct Inputs {
    pub input1: String,
    pub input2: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Input1 followed by input2
    Concat(Inputs),
    /// Input2 followed by input1 (for `tac`)
    ReverseConcat(Inputs),
    /// Merge two sorted inputs (for `sort`)
    Merge {
        /// Compare leading numbers
        #[arg(short, long)]
        numeric: bool,
        /// Inputs are sorted largest first
        #[arg(short, long)]
        reverse: bool,
        /// Drop duplicate keys
        #[arg(short, long)]
        unique: bool,
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Collapse a duplicate line at the boundary (for `uniq`)
    Uniq(Inputs),
    /// Add counts of a line split across the boundary (for `uniq -c`)
    UniqCount(Inputs),
    /// Sum count columns (for `wc`)
    Wc(Inputs),
    /// First N lines (for `head -n`)
    Head {
        #[arg(short = 'n', long, default_value_t = 10)]
        lines: usize,
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Last N lines (for `tail -n`)
    Tail {
        #[arg(short = 'n', long, default_value_t = 10)]
        lines: usize,
        #[command(flatten)]
        inputs: Inputs,
    },
}

impl Command {
    fn into_parts(self) -> (AggregatorSpec, Inputs) {
        match self {
            Self::Concat(inputs) => (AggregatorSpec::Concat, inputs),
            Self::ReverseConcat(inputs) => (AggregatorSpec::ReverseConcat, inputs),
            Self::Merge {
                numeric,
                reverse,
                unique,
                inputs,
            } => (
                AggregatorSpec::Merge {
                    numeric,
                    reverse,
                    unique,
                },
                inputs,
            ),
            Self::Uniq(inputs) => (AggregatorSpec::Uniq, inputs),
            Self::UniqCount(inputs) => (AggregatorSpec::UniqCount, inputs),
            Self::Wc(inputs) => (AggregatorSpec::Wc, inputs),
            Self::Head { lines, inputs } => (AggregatorSpec::Head { lines }, inputs),
            Self::Tail { lines, inputs } => (AggregatorSpec::Tail { lines }, inputs),
        }
    }
}

impl Cli {
    /// Resolve the command line into a configuration.
    ///
    /// With `--config`, the file provides the base configuration and the
    /// global flags override it.
    ///
    /// # Errors
    /// Returns `AggregateError::Configuration` if neither or both of a
    /// subcommand and `--config` are given, or the configuration file is
    /// unusable.
    pub fn into_config(self) -> Result<HarnessConfig> {
        let mut config = match (self.config, self.command) {
            (Some(path), None) => HarnessConfig::from_file(&path)?,
            (None, Some(command)) => {
                let (spec, inputs) = command.into_parts();
                HarnessConfig::new(
                    spec,
                    InputSource::from_arg(&inputs.input1),
                    InputSource::from_arg(&inputs.input2),
                )
            }
            (Some(_), Some(_)) => {
                return Err(AggregateError::configuration(
                    "--config cannot be combined with a subcommand",
                ))
            }
            (None, None) => {
                return Err(AggregateError::configuration(
                    "expected a subcommand or --config",
                ))
            }
        };

        if let Some(output) = self.output {
            config.output = OutputSink::from_arg(&output);
        }
        if self.flush_on_finish {
            config.flush_policy = FlushPolicy::OnFinish;
        }
        if self.annotate_failures {
            config.failure_policy = FailurePolicy::Annotate;
        }
        Ok(config)
    }
}
