// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::VecDeque;
use twinflow_core::{AggregateContext, Aggregator, Result};

/// Recombines `tail -n` partials: the last `lines` lines of input1 followed by
/// input2. Only `lines` lines are held in memory at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tail {
    lines: usize,
}

impl Tail {
    #[must_use]
    pub const fn new(lines: usize) -> Self {
        Self { lines }
    }

    #[must_use]
    pub const fn lines(&self) -> usize {
        self.lines
    }
}

impl Aggregator for Tail {
    fn name(&self) -> &str {
        "tail"
    }

    fn aggregate(&mut self, ctx: &AggregateContext<'_>) -> Result<()> {
        if self.lines == 0 {
            for input in ctx.inputs() {
                input.drain()?;
            }
            return Ok(());
        }

        // Grows with the lines actually held, never with the requested count
        let mut window = VecDeque::new();
        for input in ctx.inputs() {
            for line in input.lines() {
                let line = line?;
                if window.len() == self.lines {
                    window.pop_front();
                }
                window.push_back(line);
            }
        }

        for line in window {
            ctx.output().write_line(&line)?;
        }
        Ok(())
    }
}
