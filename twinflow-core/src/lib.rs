// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Channel contract for two-input stream aggregators.
//!
//! An aggregator pulls from two ordered input channels and pushes result
//! fragments to one output channel as soon as they are ready. The harness owns
//! the channels, lends them through an [`AggregateContext`], and runs the
//! aggregator exactly once through [`aggregate`], which never fails.

#[macro_use]
mod logging;

pub mod aggregator;
pub mod channel_status;
pub mod context;
pub mod entry;
pub mod input_channel;
pub mod output_channel;

pub use self::aggregator::{from_fn, Aggregator, FnAggregator};
pub use self::channel_status::{ChannelStatus, InputId};
pub use self::context::AggregateContext;
pub use self::entry::{aggregate, AggregateReport, FailurePolicy, Outcome};
pub use self::input_channel::{InputChannel, InputStats, Lines};
pub use self::output_channel::{FlushPolicy, OutputChannel, OutputStats};
pub use twinflow_error::{AggregateError, Result, ResultExt};
