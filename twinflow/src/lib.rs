// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Twinflow
//!
//! Recombine the outputs of a command that was run separately on two halves of
//! its input.
//!
//! ## Overview
//!
//! An aggregator reads two ordered input channels and writes one output
//! channel. It pulls from either input in whatever order it likes and pushes
//! result fragments as soon as they are ready, so downstream stages see output
//! before both inputs have ended. The harness owns the channels and calls the
//! aggregator exactly once through [`aggregate`], which never fails: errors and
//! panics end up in the returned [`AggregateReport`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io::Cursor;
//! use twinflow::prelude::*;
//!
//! let input1 = InputChannel::new(InputId::Input1, Cursor::new("apple\ncherry\n"));
//! let input2 = InputChannel::new(InputId::Input2, Cursor::new("banana\n"));
//! let output = OutputChannel::new(Vec::new());
//!
//! let ctx = AggregateContext::new(&input1, &input2, &output).unwrap();
//! let report = aggregate(&mut SortMerge::default(), &ctx, FailurePolicy::Stop);
//!
//! assert!(report.is_completed());
//! assert_eq!(report.output.bytes_written, 20);
//! ```
//!
//! ## Writing an aggregator
//!
//! Implement [`Aggregator`], or wrap a closure with [`from_fn`]:
//!
//! ```rust
//! use twinflow::prelude::*;
//!
//! let mut line_total = from_fn("line-total", |ctx| {
//!     let mut total = 0u64;
//!     for input in ctx.inputs() {
//!         for line in input.lines() {
//!             line?;
//!             total += 1;
//!         }
//!     }
//!     ctx.output().write_line(total.to_string().as_bytes())
//! });
//! # let _ = &mut line_total;
//! ```

pub use twinflow_aggregators::{
    build, AggregatorKind, AggregatorSpec, Concat, CountedLine, Head, SortMerge, SortOptions, Tail,
    Uniq, UniqCount, WordCount,
};
pub use twinflow_core::{
    aggregate, from_fn, AggregateContext, AggregateError, AggregateReport, Aggregator,
    ChannelStatus, FailurePolicy, FlushPolicy, FnAggregator, InputChannel, InputId, InputStats,
    Lines, OutputChannel, OutputStats, Outcome, Result,
};

#[cfg(feature = "harness")]
pub use twinflow_harness::{Harness, HarnessConfig, InputSource, OutputSink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use twinflow_aggregators::{
        AggregatorKind, AggregatorSpec, Concat, Head, SortMerge, SortOptions, Tail, Uniq,
        UniqCount, WordCount,
    };
    pub use twinflow_core::{
        aggregate, from_fn, AggregateContext, AggregateError, AggregateReport, Aggregator,
        FailurePolicy, FlushPolicy, InputChannel, InputId, OutputChannel,
    };

    #[cfg(feature = "harness")]
    pub use twinflow_harness::{Harness, HarnessConfig};
}
