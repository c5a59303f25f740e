// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the twinflow workspace.
//!
//! This crate is for development and testing only.
//!
//! # Key Types
//!
//! - [`TestChannels`]: two in-memory inputs and an output writing into a
//!   [`SharedBuffer`], bound into an `AggregateContext` on demand
//! - [`FailingReader`], [`FailingWriter`], [`FailingFlush`]: I/O that breaks
//!   at a chosen point
//! - [`test_data`]: inputs shaped like the partial outputs of split commands
//!
//! # Examples
//!
//! ```rust
//! use twinflow_core::from_fn;
//! use twinflow_test_utils::{assert_completed, run_aggregator};
//!
//! let mut first_only = from_fn("first-only", |ctx| {
//!     while let Some(line) = ctx.input1().read_line()? {
//!         ctx.output().write_line(&line)?;
//!     }
//!     ctx.input2().drain()?;
//!     Ok(())
//! });
//!
//! let (output, report) = run_aggregator(&mut first_only, "a\nb\n", "c\n");
//! assert_eq!(output, "a\nb\n");
//! assert_completed(&report);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod failure_injection;
pub mod helpers;
pub mod shared_buffer;
pub mod test_channels;
pub mod test_data;

pub use failure_injection::{FailingFlush, FailingReader, FailingWriter};
pub use helpers::{assert_completed, assert_inputs_exhausted, run_aggregator, run_on};
pub use shared_buffer::SharedBuffer;
pub use test_channels::{memory_input, TestChannels};
