// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt::{self, Display};

/// Readability (or writability) of a channel.
///
/// Transitions are one-way: a channel leaves `Ready` at most once, either to
/// `Exhausted` (inputs only) or to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelStatus {
    /// More data may be read, or writes are accepted
    Ready,
    /// The input reached its end
    Exhausted,
    /// An I/O error occurred; the channel keeps reporting it
    Failed,
}

impl ChannelStatus {
    /// Returns `true` while the channel can still be used.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl Display for ChannelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ready => "ready",
            Self::Exhausted => "exhausted",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Which of the two inputs a channel is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputId {
    Input1,
    Input2,
}

impl InputId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input1 => "input1",
            Self::Input2 => "input2",
        }
    }
}

impl Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
