// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Reference harness for twinflow aggregators.
//!
//! The harness opens two input sources and an output sink, lends them to one
//! aggregator through the no-fail entry point, and finishes the output after
//! the aggregator returns. [`cli`] maps the `twinflow` command line onto a
//! [`HarnessConfig`].

pub mod cli;
pub mod config;
pub mod harness;
pub mod logging;

pub use cli::{Cli, Command, Inputs};
pub use config::{HarnessConfig, InputSource, OutputSink};
pub use harness::Harness;
pub use logging::{init_logging, LOG_ENV};
