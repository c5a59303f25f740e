// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::channel_status::ChannelStatus;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use twinflow_error::{AggregateError, Result};

/// When the output channel pushes written fragments to its sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlushPolicy {
    /// Flush after every fragment so partial results reach the sink immediately
    #[default]
    EveryFragment,
    /// Flush only on an explicit `flush` and when the harness finishes the channel
    OnFinish,
}

/// Counters for the data written to an output channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputStats {
    pub bytes_written: u64,
    pub fragments_written: u64,
}

/// A write-only, append-only byte sequence owned by the harness.
///
/// Every write appends after the previous one, in the order the writes are
/// issued. The aggregator holds `&OutputChannel` and cannot close it; only the
/// owner can call [`finish`](Self::finish).
///
/// The status is either [`ChannelStatus::Ready`] or [`ChannelStatus::Failed`].
/// Once a write or flush fails, every later write returns the same error.
pub struct OutputChannel {
    state: Mutex<OutputState>,
}

struct OutputState {
    writer: Box<dyn Write + Send>,
    policy: FlushPolicy,
    status: ChannelStatus,
    failure: Option<AggregateError>,
    stats: OutputStats,
}

impl OutputState {
    fn ensure_writable(&self) -> Result<()> {
        match (&self.status, &self.failure) {
            (ChannelStatus::Failed, Some(failure)) => Err(failure.clone()),
            (ChannelStatus::Failed, None) => Err(AggregateError::invalid_state(
                "output failed without a recorded error",
            )),
            _ => Ok(()),
        }
    }

    fn fail(&mut self, operation: &str, error: &io::Error) -> AggregateError {
        warn!("output {} failed: {}", operation, error);
        let failure = AggregateError::output_failed(format!("{operation}: {error}"));
        self.status = ChannelStatus::Failed;
        self.failure = Some(failure.clone());
        failure
    }

    fn write_parts(&mut self, parts: &[&[u8]]) -> Result<()> {
        self.ensure_writable()?;

        let len: usize = parts.iter().map(|part| part.len()).sum();
        if len == 0 {
            return Ok(());
        }

        for part in parts {
            if let Err(e) = self.writer.write_all(part) {
                return Err(self.fail("write", &e));
            }
        }
        self.stats.bytes_written += len as u64;
        self.stats.fragments_written += 1;

        if self.policy == FlushPolicy::EveryFragment {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.ensure_writable()?;
        match self.writer.flush() {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail("flush", &e)),
        }
    }
}

impl OutputChannel {
    /// Create a channel that flushes after every fragment.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self::with_flush_policy(writer, FlushPolicy::default())
    }

    pub fn with_flush_policy(writer: impl Write + Send + 'static, policy: FlushPolicy) -> Self {
        Self {
            state: Mutex::new(OutputState {
                writer: Box::new(writer),
                policy,
                status: ChannelStatus::Ready,
                failure: None,
                stats: OutputStats::default(),
            }),
        }
    }

    #[must_use]
    pub fn status(&self) -> ChannelStatus {
        self.state.lock().status
    }

    #[must_use]
    pub fn flush_policy(&self) -> FlushPolicy {
        self.state.lock().policy
    }

    /// The error that moved this channel to `Failed`, if any.
    #[must_use]
    pub fn failure(&self) -> Option<AggregateError> {
        self.state.lock().failure.clone()
    }

    #[must_use]
    pub fn stats(&self) -> OutputStats {
        self.state.lock().stats
    }

    /// Append a result fragment. Empty fragments are ignored.
    ///
    /// # Errors
    /// Returns `AggregateError::OutputFailed` if the sink rejects the write or
    /// the flush, now or on an earlier call.
    pub fn write_fragment(&self, fragment: &[u8]) -> Result<()> {
        self.state.lock().write_parts(&[fragment])
    }

    /// Append `line` followed by a newline as a single fragment.
    ///
    /// # Errors
    /// Returns `AggregateError::OutputFailed` if the sink fails.
    pub fn write_line(&self, line: &[u8]) -> Result<()> {
        self.state.lock().write_parts(&[line, b"\n".as_slice()])
    }

    /// Push everything written so far to the sink.
    ///
    /// # Errors
    /// Returns `AggregateError::OutputFailed` if the sink fails.
    pub fn flush(&self) -> Result<()> {
        self.state.lock().flush()
    }

    /// Flush and release the sink, returning the final statistics.
    ///
    /// Only the owner of the channel can call this, so an aggregator holding a
    /// reference can never finalize the output early.
    ///
    /// # Errors
    /// Returns the stored failure if the channel already failed, or
    /// `AggregateError::OutputFailed` if the final flush fails.
    pub fn finish(self) -> Result<OutputStats> {
        let mut state = self.state.into_inner();
        state.flush()?;
        Ok(state.stats)
    }
}

impl fmt::Debug for OutputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("OutputChannel")
            .field("policy", &state.policy)
            .field("status", &state.status)
            .field("stats", &state.stats)
            .finish_non_exhaustive()
    }
}
