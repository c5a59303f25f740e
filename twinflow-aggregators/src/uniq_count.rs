// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use twinflow_core::{AggregateContext, AggregateError, Aggregator, InputId, Result};

/// A parsed `uniq -c` record: the repeat count and the line it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountedLine {
    pub count: u64,
    pub line: Vec<u8>,
}

impl CountedLine {
    /// Parse `<blanks><count> <line>`.
    ///
    /// # Errors
    /// Returns `AggregateError::MalformedInput` when the count is missing, does
    /// not fit in a `u64`, or is not followed by a single space.
    pub fn parse(record: &[u8], channel: InputId, line_number: u64) -> Result<Self> {
        let malformed =
            |message: &str| AggregateError::malformed_input(channel.as_str(), line_number, message);

        let start = record
            .iter()
            .position(|b| !matches!(b, b' ' | b'\t'))
            .unwrap_or(record.len());
        let rest = &record[start..];
        let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Err(malformed("missing repeat count"));
        }

        let count = std::str::from_utf8(&rest[..digits])
            .ok()
            .and_then(|text| text.parse::<u64>().ok())
            .ok_or_else(|| malformed("repeat count out of range"))?;

        let line = match rest.get(digits) {
            Some(b' ') => rest[digits + 1..].to_vec(),
            _ => return Err(malformed("expected a space after the repeat count")),
        };

        Ok(Self { count, line })
    }

    /// Render in `uniq -c` layout, count right-aligned to seven columns.
    #[must_use]
    pub fn render(&self) -> Vec<u8> {
        let mut out = format!("{:>7} ", self.count).into_bytes();
        out.extend_from_slice(&self.line);
        out
    }
}

/// Recombines `uniq -c` partials.
///
/// Records pass through in order; when the last record of input1 and the first
/// of input2 name the same line their counts are added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniqCount;

impl UniqCount {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Aggregator for UniqCount {
    fn name(&self) -> &str {
        "uniq-count"
    }

    fn aggregate(&mut self, ctx: &AggregateContext<'_>) -> Result<()> {
        let mut pending: Option<CountedLine> = None;
        for input in ctx.inputs() {
            for (index, record) in input.lines().enumerate() {
                let record = CountedLine::parse(&record?, input.id(), index as u64 + 1)?;
                match pending.as_mut() {
                    Some(current) if current.line == record.line => {
                        current.count = current.count.saturating_add(record.count);
                    }
                    _ => {
                        if let Some(done) = pending.replace(record) {
                            ctx.output().write_line(&done.render())?;
                        }
                    }
                }
            }
        }

        if let Some(done) = pending {
            ctx.output().write_line(&done.render())?;
        }
        Ok(())
    }
}
