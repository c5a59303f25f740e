// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Readers and writers that fail on purpose.
//!
//! Both deliver real data up to a chosen point and then return an I/O error
//! on every later call, which is how a broken pipe or a vanished file looks to
//! an input or output channel.

use std::io::{self, Read, Write};

fn injected(what: &str) -> io::Error {
    io::Error::other(format!("injected {what} failure"))
}

/// A reader that yields `data` and then fails.
///
/// ```rust
/// use std::io::Read;
/// use twinflow_test_utils::FailingReader;
///
/// let mut reader = FailingReader::new("ok\n");
/// let mut buf = [0u8; 16];
/// assert_eq!(reader.read(&mut buf).unwrap(), 3);
/// assert!(reader.read(&mut buf).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct FailingReader {
    data: Vec<u8>,
    position: usize,
}

impl FailingReader {
    pub fn new(data: impl AsRef<[u8]>) -> Self {
        Self {
            data: data.as_ref().to_vec(),
            position: 0,
        }
    }

    /// A reader that fails on its first call.
    #[must_use]
    pub fn immediately() -> Self {
        Self::new(b"")
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.data[self.position..];
        if remaining.is_empty() {
            return Err(injected("read"));
        }
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.position += n;
        Ok(n)
    }
}

/// A writer that forwards up to `limit` bytes to `inner` and then fails.
///
/// A write straddling the limit forwards the bytes that fit and reports a
/// short write; the next call fails.
#[derive(Debug, Clone)]
pub struct FailingWriter<W> {
    inner: W,
    remaining: usize,
}

impl<W: Write> FailingWriter<W> {
    pub fn new(inner: W, limit: usize) -> Self {
        Self {
            inner,
            remaining: limit,
        }
    }
}

impl<W: Write> Write for FailingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(injected("write"));
        }
        let n = buf.len().min(self.remaining);
        let written = self.inner.write(&buf[..n])?;
        self.remaining -= written;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// A writer that accepts writes but fails every flush.
#[derive(Debug, Clone, Default)]
pub struct FailingFlush<W> {
    inner: W,
}

impl<W: Write> FailingFlush<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for FailingFlush<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(injected("flush"))
    }
}
