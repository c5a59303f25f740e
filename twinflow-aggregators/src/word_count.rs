// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use twinflow_core::{AggregateContext, AggregateError, Aggregator, Result};

/// Recombines `wc` partials by summing their columns.
///
/// Every non-blank line holds the same number of whitespace-separated counts.
/// A single column is printed bare; several are right-aligned to seven columns
/// and separated by a space, as `wc` prints them for standard input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordCount;

impl WordCount {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn render(totals: &[u64]) -> String {
    match totals {
        [single] => single.to_string(),
        _ => totals
            .iter()
            .map(|total| format!("{total:>7}"))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

impl Aggregator for WordCount {
    fn name(&self) -> &str {
        "wc"
    }

    fn aggregate(&mut self, ctx: &AggregateContext<'_>) -> Result<()> {
        let mut totals: Option<Vec<u64>> = None;

        for input in ctx.inputs() {
            for (index, line) in input.lines().enumerate() {
                let line = line?;
                let line_number = index as u64 + 1;
                let malformed = |message: String| {
                    AggregateError::malformed_input(input.id().as_str(), line_number, message)
                };

                let text = std::str::from_utf8(&line)
                    .map_err(|_| malformed("counts are not valid UTF-8".to_string()))?;
                let counts = text
                    .split_whitespace()
                    .map(|field| {
                        field
                            .parse::<u64>()
                            .map_err(|_| malformed(format!("'{field}' is not a count")))
                    })
                    .collect::<Result<Vec<_>>>()?;
                if counts.is_empty() {
                    continue;
                }

                match totals.as_mut() {
                    None => totals = Some(counts),
                    Some(sums) if sums.len() == counts.len() => {
                        for (sum, count) in sums.iter_mut().zip(counts) {
                            *sum = sum.saturating_add(count);
                        }
                    }
                    Some(sums) => {
                        return Err(malformed(format!(
                            "expected {} columns, found {}",
                            sums.len(),
                            counts.len()
                        )));
                    }
                }
            }
        }

        if let Some(totals) = totals {
            ctx.output().write_line(render(&totals).as_bytes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_column_is_bare() {
        assert_eq!(render(&[42]), "42");
    }

    #[test]
    fn test_render_columns_are_padded() {
        assert_eq!(render(&[8, 32, 181]), "      8      32     181");
    }
}
