// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Aggregators that recombine the partial outputs of a command run on two
//! halves of its input.
//!
//! | Aggregator | Recombines |
//! |------------|------------|
//! | [`Concat`] | `cat`, `grep`, `sed`, `tr` and other per-line filters |
//! | [`Concat::reversed`] | `tac` |
//! | [`SortMerge`] | `sort`, `sort -n`, `sort -r`, `sort -u` |
//! | [`Uniq`] | `uniq` |
//! | [`UniqCount`] | `uniq -c` |
//! | [`WordCount`] | `wc`, `wc -l` and friends |
//! | [`Head`] | `head -n` |
//! | [`Tail`] | `tail -n` |
//!
//! Every aggregator writes nothing when both inputs are empty, and terminates
//! each line it writes with a newline.
//!
//! ```
//! use twinflow_aggregators::{AggregatorKind, AggregatorSpec};
//! use twinflow_core::Aggregator;
//!
//! let kind: AggregatorKind = "uniq-count".parse().unwrap();
//! let aggregator = AggregatorSpec::from(kind).build();
//! assert_eq!(aggregator.name(), "uniq-count");
//! ```

pub mod concat;
pub mod head;
pub mod registry;
pub mod sort_merge;
pub mod tail;
pub mod uniq;
pub mod uniq_count;
pub mod word_count;

pub use concat::Concat;
pub use head::Head;
pub use registry::{build, AggregatorKind, AggregatorSpec};
pub use sort_merge::{SortMerge, SortOptions};
pub use tail::Tail;
pub use uniq::Uniq;
pub use uniq_count::{CountedLine, UniqCount};
pub use word_count::WordCount;
