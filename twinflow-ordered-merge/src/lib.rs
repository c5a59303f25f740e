// Copyright 2025 Umberto Gotti
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
mod ordered_merge;

pub use ordered_merge::{OrderedMerge, OrderedMergeExt};
