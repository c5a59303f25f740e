// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// An in-memory sink whose contents stay observable after it is handed to an
/// `OutputChannel`.
///
/// Clones share the same buffer. Besides the written bytes it records how
/// many bytes had been flushed, which lets tests tell incremental output from
/// output that only shows up at the end.
///
/// ```rust
/// use std::io::Write;
/// use twinflow_test_utils::SharedBuffer;
///
/// let buffer = SharedBuffer::new();
/// let mut writer = buffer.clone();
/// writer.write_all(b"partial").unwrap();
/// assert_eq!(buffer.as_string(), "partial");
/// assert_eq!(buffer.flushed_string(), "");
///
/// writer.flush().unwrap();
/// assert_eq!(buffer.flushed_string(), "partial");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<BufferState>>,
}

#[derive(Debug, Default)]
struct BufferState {
    data: Vec<u8>,
    flushed_len: usize,
    flushes: usize,
}

impl SharedBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, flushed or not.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.inner.lock().data.clone()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    #[must_use]
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().data).into_owned()
    }

    /// The prefix that had been written at the time of the last flush.
    #[must_use]
    pub fn flushed_string(&self) -> String {
        let state = self.inner.lock();
        String::from_utf8_lossy(&state.data[..state.flushed_len]).into_owned()
    }

    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.inner.lock().flushes
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.inner.lock();
        state.flushed_len = state.data.len();
        state.flushes += 1;
        Ok(())
    }
}
