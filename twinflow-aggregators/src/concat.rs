// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use twinflow_core::{AggregateContext, Aggregator, InputId, Result};

const CHUNK_SIZE: usize = 64 * 1024;

/// Copies one input after the other, byte for byte.
///
/// [`Concat::new`] recombines `cat` partials (input1 then input2);
/// [`Concat::reversed`] recombines `tac` partials, where the second half of the
/// file comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concat {
    order: [InputId; 2],
}

impl Concat {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            order: [InputId::Input1, InputId::Input2],
        }
    }

    #[must_use]
    pub const fn reversed() -> Self {
        Self {
            order: [InputId::Input2, InputId::Input1],
        }
    }
}

impl Default for Concat {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator for Concat {
    fn name(&self) -> &str {
        match self.order[0] {
            InputId::Input1 => "concat",
            InputId::Input2 => "reverse-concat",
        }
    }

    fn aggregate(&mut self, ctx: &AggregateContext<'_>) -> Result<()> {
        let mut buf = vec![0u8; CHUNK_SIZE];
        for id in self.order {
            let input = ctx.input(id);
            loop {
                let n = input.read_chunk(&mut buf)?;
                if n == 0 {
                    break;
                }
                ctx.output().write_fragment(&buf[..n])?;
            }
        }
        Ok(())
    }
}
