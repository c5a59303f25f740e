// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use twinflow_aggregators::AggregatorSpec;
use twinflow_core::{AggregateError, FailurePolicy, FlushPolicy, Result};

/// Where an input channel reads from.
///
/// Serialized as `"stdin"` or `{"path": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputSource {
    Stdin,
    Path(PathBuf),
}

impl InputSource {
    /// Interpret a command line argument, where `-` names standard input.
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdin => None,
            Self::Path(path) => Some(path),
        }
    }
}

/// Where the output channel writes to.
///
/// Serialized as `"stdout"` or `{"path": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputSink {
    #[default]
    Stdout,
    Path(PathBuf),
}

impl OutputSink {
    /// Interpret a command line argument, where `-` names standard output.
    #[must_use]
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdout
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdout => None,
            Self::Path(path) => Some(path),
        }
    }
}

/// Everything the harness needs for one invocation.
///
/// ```
/// use twinflow_harness::HarnessConfig;
///
/// let config = HarnessConfig::from_json(
///     r#"{
///         "input1": {"path": "part1.txt"},
///         "input2": "stdin",
///         "aggregator": {"kind": "merge", "numeric": true}
///     }"#,
/// )
/// .unwrap();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HarnessConfig {
    pub input1: InputSource,
    pub input2: InputSource,
    #[serde(default)]
    pub output: OutputSink,
    #[serde(default)]
    pub flush_policy: FlushPolicy,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    pub aggregator: AggregatorSpec,
}

impl HarnessConfig {
    /// A configuration writing to standard output with default policies.
    #[must_use]
    pub fn new(aggregator: AggregatorSpec, input1: InputSource, input2: InputSource) -> Self {
        Self {
            input1,
            input2,
            output: OutputSink::default(),
            flush_policy: FlushPolicy::default(),
            failure_policy: FailurePolicy::default(),
            aggregator,
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputSink) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_flush_policy(mut self, policy: FlushPolicy) -> Self {
        self.flush_policy = policy;
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Parse a JSON configuration.
    ///
    /// # Errors
    /// Returns `AggregateError::Configuration` if the document does not
    /// describe a configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AggregateError::configuration(format!("invalid configuration: {e}")))
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    /// Returns `AggregateError::Configuration` if the file cannot be read or
    /// parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            AggregateError::configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Check that the two inputs and the output are distinct channels.
    ///
    /// # Errors
    /// Returns `AggregateError::Configuration` if both inputs read standard
    /// input or the output names an input file. Two inputs naming the same
    /// file are fine: each gets its own handle and cursor.
    pub fn validate(&self) -> Result<()> {
        if self.input1 == InputSource::Stdin && self.input2 == InputSource::Stdin {
            return Err(AggregateError::configuration(
                "input1 and input2 cannot both read standard input",
            ));
        }

        if let Some(output) = self.output.path() {
            for input in [&self.input1, &self.input2].into_iter().filter_map(InputSource::path) {
                if same_file(output, input) {
                    return Err(AggregateError::configuration(format!(
                        "output {} is also an input",
                        output.display()
                    )));
                }
            }
        }

        Ok(())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
