// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Concat, Head, SortMerge, SortOptions, Tail, Uniq, UniqCount, WordCount};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use twinflow_core::{AggregateError, Aggregator};

const DEFAULT_LINES: usize = 10;

fn default_lines() -> usize {
    DEFAULT_LINES
}

/// The name of an aggregator, as used on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AggregatorKind {
    Concat,
    ReverseConcat,
    Merge,
    Uniq,
    UniqCount,
    Wc,
    Head,
    Tail,
}

impl AggregatorKind {
    pub const ALL: [Self; 8] = [
        Self::Concat,
        Self::ReverseConcat,
        Self::Merge,
        Self::Uniq,
        Self::UniqCount,
        Self::Wc,
        Self::Head,
        Self::Tail,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Concat => "concat",
            Self::ReverseConcat => "reverse-concat",
            Self::Merge => "merge",
            Self::Uniq => "uniq",
            Self::UniqCount => "uniq-count",
            Self::Wc => "wc",
            Self::Head => "head",
            Self::Tail => "tail",
        }
    }
}

impl fmt::Display for AggregatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregatorKind {
    type Err = AggregateError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| AggregateError::configuration(format!("unknown aggregator '{name}'")))
    }
}

/// A fully parameterised aggregator selection.
///
/// Serialized with a `kind` tag, e.g. `{"kind": "head", "lines": 5}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AggregatorSpec {
    Concat,
    ReverseConcat,
    Merge {
        #[serde(default)]
        numeric: bool,
        #[serde(default)]
        reverse: bool,
        #[serde(default)]
        unique: bool,
    },
    Uniq,
    UniqCount,
    Wc,
    Head {
        #[serde(default = "default_lines")]
        lines: usize,
    },
    Tail {
        #[serde(default = "default_lines")]
        lines: usize,
    },
}

impl AggregatorSpec {
    /// `kind` with its default parameters.
    #[must_use]
    pub const fn with_defaults(kind: AggregatorKind) -> Self {
        match kind {
            AggregatorKind::Concat => Self::Concat,
            AggregatorKind::ReverseConcat => Self::ReverseConcat,
            AggregatorKind::Merge => Self::Merge {
                numeric: false,
                reverse: false,
                unique: false,
            },
            AggregatorKind::Uniq => Self::Uniq,
            AggregatorKind::UniqCount => Self::UniqCount,
            AggregatorKind::Wc => Self::Wc,
            AggregatorKind::Head => Self::Head {
                lines: DEFAULT_LINES,
            },
            AggregatorKind::Tail => Self::Tail {
                lines: DEFAULT_LINES,
            },
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AggregatorKind {
        match self {
            Self::Concat => AggregatorKind::Concat,
            Self::ReverseConcat => AggregatorKind::ReverseConcat,
            Self::Merge { .. } => AggregatorKind::Merge,
            Self::Uniq => AggregatorKind::Uniq,
            Self::UniqCount => AggregatorKind::UniqCount,
            Self::Wc => AggregatorKind::Wc,
            Self::Head { .. } => AggregatorKind::Head,
            Self::Tail { .. } => AggregatorKind::Tail,
        }
    }

    /// Instantiate the described aggregator.
    #[must_use]
    pub fn build(&self) -> Box<dyn Aggregator + Send> {
        match *self {
            Self::Concat => Box::new(Concat::new()),
            Self::ReverseConcat => Box::new(Concat::reversed()),
            Self::Merge {
                numeric,
                reverse,
                unique,
            } => Box::new(SortMerge::new(SortOptions {
                numeric,
                reverse,
                unique,
            })),
            Self::Uniq => Box::new(Uniq::new()),
            Self::UniqCount => Box::new(UniqCount::new()),
            Self::Wc => Box::new(WordCount::new()),
            Self::Head { lines } => Box::new(Head::new(lines)),
            Self::Tail { lines } => Box::new(Tail::new(lines)),
        }
    }
}

impl From<AggregatorKind> for AggregatorSpec {
    fn from(kind: AggregatorKind) -> Self {
        Self::with_defaults(kind)
    }
}

/// Instantiate the aggregator described by `spec`.
#[must_use]
pub fn build(spec: &AggregatorSpec) -> Box<dyn Aggregator + Send> {
    spec.build()
}
