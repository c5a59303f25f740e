// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use twinflow_core::{AggregateContext, Aggregator, Result};

/// Recombines `head -n` partials: the first `lines` lines of input1 followed
/// by input2. Whatever is not needed is still read to the end, so the
/// upstream stages never block on a full pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    lines: usize,
}

impl Head {
    #[must_use]
    pub const fn new(lines: usize) -> Self {
        Self { lines }
    }

    #[must_use]
    pub const fn lines(&self) -> usize {
        self.lines
    }
}

impl Aggregator for Head {
    fn name(&self) -> &str {
        "head"
    }

    fn aggregate(&mut self, ctx: &AggregateContext<'_>) -> Result<()> {
        let mut remaining = self.lines;
        for input in ctx.inputs() {
            while remaining > 0 {
                let Some(line) = input.read_line()? else {
                    break;
                };
                ctx.output().write_line(&line)?;
                remaining -= 1;
            }
            input.drain()?;
        }
        Ok(())
    }
}
