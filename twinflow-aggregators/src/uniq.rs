// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use twinflow_core::{AggregateContext, Aggregator, Result};

/// Recombines `uniq` partials: input1 then input2, collapsing adjacent
/// duplicate lines, including a duplicate pair that straddles the two inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Uniq;

impl Uniq {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Aggregator for Uniq {
    fn name(&self) -> &str {
        "uniq"
    }

    fn aggregate(&mut self, ctx: &AggregateContext<'_>) -> Result<()> {
        let mut previous: Option<Vec<u8>> = None;
        for input in ctx.inputs() {
            for line in input.lines() {
                let line = line?;
                if previous.as_deref() == Some(line.as_slice()) {
                    continue;
                }
                ctx.output().write_line(&line)?;
                previous = Some(line);
            }
        }
        Ok(())
    }
}
