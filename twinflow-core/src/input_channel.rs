// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::channel_status::{ChannelStatus, InputId};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, BufRead, BufReader, ErrorKind, Read};
use twinflow_error::{AggregateError, Result};

const DRAIN_CHUNK: usize = 8 * 1024;

/// Counters for the data an input channel has delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputStats {
    pub bytes_read: u64,
    /// Newline-terminated records seen, plus a final unterminated one
    pub lines_read: u64,
}

/// An ordered, read-only byte sequence owned by the harness.
///
/// The aggregator only ever sees `&InputChannel`. The read cursor lives inside
/// the channel, so every reference to it shares the same position. Reads never
/// reopen or rewind the underlying source.
///
/// End of data is discovered by reading: [`read_line`](Self::read_line) returns
/// `Ok(None)` and [`read_chunk`](Self::read_chunk) returns `Ok(0)`, after which
/// the status is [`ChannelStatus::Exhausted`]. An I/O error moves the channel to
/// [`ChannelStatus::Failed`]; the error is kept and returned by every later read.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use twinflow_core::{ChannelStatus, InputChannel, InputId};
///
/// let input = InputChannel::new(InputId::Input1, Cursor::new("a\nb"));
/// assert_eq!(input.read_line().unwrap(), Some(b"a".to_vec()));
/// assert_eq!(input.read_line().unwrap(), Some(b"b".to_vec()));
/// assert_eq!(input.read_line().unwrap(), None);
/// assert_eq!(input.status(), ChannelStatus::Exhausted);
/// ```
pub struct InputChannel {
    id: InputId,
    state: Mutex<InputState>,
}

struct InputState {
    reader: Box<dyn BufRead + Send>,
    status: ChannelStatus,
    failure: Option<AggregateError>,
    stats: InputStats,
}

impl InputState {
    /// `Ok(false)` once exhausted, the stored error once failed.
    fn readable(&self) -> Result<bool> {
        match self.status {
            ChannelStatus::Ready => Ok(true),
            ChannelStatus::Exhausted => Ok(false),
            ChannelStatus::Failed => Err(self.stored_failure()),
        }
    }

    fn stored_failure(&self) -> AggregateError {
        self.failure
            .clone()
            .unwrap_or_else(|| AggregateError::invalid_state("input failed without a recorded error"))
    }

    fn exhaust(&mut self, id: InputId) {
        debug!(
            "{} exhausted after {} bytes, {} lines",
            id, self.stats.bytes_read, self.stats.lines_read
        );
        self.status = ChannelStatus::Exhausted;
    }

    fn fail(&mut self, id: InputId, error: &io::Error) -> AggregateError {
        warn!("{} failed: {}", id, error);
        let failure = AggregateError::input_failed(id.as_str(), error.to_string());
        self.status = ChannelStatus::Failed;
        self.failure = Some(failure.clone());
        failure
    }
}

impl InputChannel {
    /// Create a channel over a buffered reader.
    pub fn new(id: InputId, reader: impl BufRead + Send + 'static) -> Self {
        Self {
            id,
            state: Mutex::new(InputState {
                reader: Box::new(reader),
                status: ChannelStatus::Ready,
                failure: None,
                stats: InputStats::default(),
            }),
        }
    }

    /// Create a channel over an unbuffered reader, wrapping it in a `BufReader`.
    pub fn from_reader(id: InputId, reader: impl Read + Send + 'static) -> Self {
        Self::new(id, BufReader::new(reader))
    }

    #[must_use]
    pub fn id(&self) -> InputId {
        self.id
    }

    #[must_use]
    pub fn status(&self) -> ChannelStatus {
        self.state.lock().status
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.status() == ChannelStatus::Exhausted
    }

    /// The error that moved this channel to `Failed`, if any.
    #[must_use]
    pub fn failure(&self) -> Option<AggregateError> {
        self.state.lock().failure.clone()
    }

    #[must_use]
    pub fn stats(&self) -> InputStats {
        self.state.lock().stats
    }

    /// Read the next newline-delimited record, without its terminator.
    ///
    /// A final record that lacks a trailing newline is still returned.
    ///
    /// # Errors
    /// Returns `AggregateError::InputFailed` if the underlying reader fails, now
    /// or on an earlier read.
    pub fn read_line(&self) -> Result<Option<Vec<u8>>> {
        let mut state = self.state.lock();
        if !state.readable()? {
            return Ok(None);
        }

        let mut line = Vec::new();
        match state.reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                state.exhaust(self.id);
                Ok(None)
            }
            Ok(n) => {
                state.stats.bytes_read += n as u64;
                state.stats.lines_read += 1;
                if line.last() == Some(&b'\n') {
                    line.pop();
                }
                Ok(Some(line))
            }
            Err(e) => Err(state.fail(self.id, &e)),
        }
    }

    /// Read raw bytes into `buf`, returning how many were read.
    ///
    /// Returns `Ok(0)` at end of data. An empty `buf` reads nothing and leaves
    /// the status untouched.
    ///
    /// # Errors
    /// Returns `AggregateError::InputFailed` if the underlying reader fails.
    pub fn read_chunk(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut state = self.state.lock();
        if !state.readable()? {
            return Ok(0);
        }

        loop {
            match state.reader.read(buf) {
                Ok(0) => {
                    state.exhaust(self.id);
                    return Ok(0);
                }
                Ok(n) => {
                    state.stats.bytes_read += n as u64;
                    state.stats.lines_read +=
                        buf[..n].iter().filter(|&&b| b == b'\n').count() as u64;
                    return Ok(n);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(state.fail(self.id, &e)),
            }
        }
    }

    /// Consume and discard the rest of the channel, returning the bytes skipped.
    ///
    /// # Errors
    /// Returns `AggregateError::InputFailed` if the underlying reader fails.
    pub fn drain(&self) -> Result<u64> {
        let mut buf = [0u8; DRAIN_CHUNK];
        let mut skipped = 0u64;
        loop {
            let n = self.read_chunk(&mut buf)?;
            if n == 0 {
                return Ok(skipped);
            }
            skipped += n as u64;
        }
    }

    /// Iterate over the remaining records.
    ///
    /// The iterator ends at end of data, and after yielding the first error.
    pub fn lines(&self) -> Lines<'_> {
        Lines {
            channel: self,
            done: false,
        }
    }
}

impl fmt::Debug for InputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("InputChannel")
            .field("id", &self.id)
            .field("status", &state.status)
            .field("stats", &state.stats)
            .finish_non_exhaustive()
    }
}

/// Iterator over the records of an [`InputChannel`], created by
/// [`InputChannel::lines`].
#[derive(Debug)]
pub struct Lines<'a> {
    channel: &'a InputChannel,
    done: bool,
}

impl Iterator for Lines<'_> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.channel.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
