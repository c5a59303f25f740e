// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use twinflow_core::{AggregateContext, Aggregator, Result};
use twinflow_ordered_merge::OrderedMergeExt;

/// How [`SortMerge`] orders lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    /// Compare the leading number of each line instead of its bytes
    #[serde(default)]
    pub numeric: bool,
    /// Largest first
    #[serde(default)]
    pub reverse: bool,
    /// Drop lines whose key equals the previously emitted one
    #[serde(default)]
    pub unique: bool,
}

impl SortOptions {
    /// Order by the sort key alone.
    ///
    /// Numeric keys are the leading number of the line, after optional blanks
    /// and an optional minus sign; a line without one has key zero.
    #[must_use]
    pub fn compare_keys(&self, a: &[u8], b: &[u8]) -> Ordering {
        if self.numeric {
            NumericKey::parse(a).cmp(&NumericKey::parse(b))
        } else {
            a.cmp(b)
        }
    }

    /// Full line order: the key, then the raw bytes, then the direction.
    #[must_use]
    pub fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        let ordering = self.compare_keys(a, b).then_with(|| a.cmp(b));
        if self.reverse {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// The leading decimal number of a line, kept as digit strings so that any
/// length compares exactly.
#[derive(Debug, Clone, Copy)]
struct NumericKey<'a> {
    negative: bool,
    /// Integer digits without leading zeros
    integer: &'a [u8],
    /// Fraction digits without trailing zeros
    fraction: &'a [u8],
}

impl<'a> NumericKey<'a> {
    fn parse(line: &'a [u8]) -> Self {
        let start = line
            .iter()
            .position(|b| !matches!(b, b' ' | b'\t'))
            .unwrap_or(line.len());
        let mut rest = &line[start..];

        let negative = rest.first() == Some(&b'-');
        if negative {
            rest = &rest[1..];
        }

        let integer_len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        let (integer, rest) = rest.split_at(integer_len);
        let fraction = match rest.split_first() {
            Some((b'.', after)) => {
                let len = after.iter().take_while(|b| b.is_ascii_digit()).count();
                &after[..len]
            }
            _ => &[][..],
        };

        let leading_zeros = integer.iter().take_while(|&&b| b == b'0').count();
        let trailing_zeros = fraction.iter().rev().take_while(|&&b| b == b'0').count();
        Self {
            negative,
            integer: &integer[leading_zeros..],
            fraction: &fraction[..fraction.len() - trailing_zeros],
        }
    }

    fn is_zero(&self) -> bool {
        self.integer.is_empty() && self.fraction.is_empty()
    }

    fn compare_magnitude(&self, other: &Self) -> Ordering {
        self.integer
            .len()
            .cmp(&other.integer.len())
            .then_with(|| self.integer.cmp(other.integer))
            .then_with(|| self.fraction.cmp(other.fraction))
    }
}

impl Ord for NumericKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // -0 and 0 are the same number
        let negative = self.negative && !self.is_zero();
        let other_negative = other.negative && !other.is_zero();
        match (negative, other_negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.compare_magnitude(other),
            (true, true) => other.compare_magnitude(self),
        }
    }
}

impl PartialEq for NumericKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumericKey<'_> {}

impl PartialOrd for NumericKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Merges two sorted inputs into one sorted output (`sort -m`).
///
/// Lines are read one at a time from whichever input holds the next smallest
/// line; equal lines keep input1 first. If an input is not sorted the output
/// is still deterministic but not sorted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortMerge {
    options: SortOptions,
}

impl SortMerge {
    #[must_use]
    pub const fn new(options: SortOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> SortOptions {
        self.options
    }
}

impl Aggregator for SortMerge {
    fn name(&self) -> &str {
        "merge"
    }

    fn aggregate(&mut self, ctx: &AggregateContext<'_>) -> Result<()> {
        let options = self.options;
        let merged = vec![ctx.input1().lines(), ctx.input2().lines()]
            .ordered_merge_by(move |a: &Vec<u8>, b: &Vec<u8>| options.compare(a, b));

        let mut previous: Option<Vec<u8>> = None;
        for line in merged {
            let line = line?;
            if options.unique {
                if let Some(prev) = &previous {
                    if options.compare_keys(prev, &line) == Ordering::Equal {
                        continue;
                    }
                }
            }
            ctx.output().write_line(&line)?;
            if options.unique {
                previous = Some(line);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(line: &[u8]) -> NumericKey<'_> {
        NumericKey::parse(line)
    }

    #[test]
    fn test_numeric_key_parts() {
        let parsed = key(b"  -007.250 apples");

        assert!(parsed.negative);
        assert_eq!(parsed.integer, b"7");
        assert_eq!(parsed.fraction, b"25");
    }

    #[test]
    fn test_numeric_key_without_number_is_zero() {
        assert!(key(b"abc").is_zero());
        assert!(key(b"").is_zero());
        assert!(key(b"-").is_zero());
        assert!(key(b".").is_zero());
        assert_eq!(key(b"abc").cmp(&key(b"0")), Ordering::Equal);
    }

    #[test]
    fn test_numeric_key_order() {
        assert_eq!(key(b"9").cmp(&key(b"10")), Ordering::Less);
        assert_eq!(key(b"12.").cmp(&key(b"12")), Ordering::Equal);
        assert_eq!(key(b"1.5").cmp(&key(b"1.25")), Ordering::Greater);
        assert_eq!(key(b"-3.5").cmp(&key(b"-3")), Ordering::Less);
        assert_eq!(key(b"-1").cmp(&key(b"0.5")), Ordering::Less);
        assert_eq!(key(b"-0").cmp(&key(b"0")), Ordering::Equal);
        assert_eq!(key(b"-0.0").cmp(&key(b".0")), Ordering::Equal);
    }

    #[test]
    fn test_numeric_key_exact_beyond_float_precision() {
        assert_eq!(
            key(b"9007199254740992").cmp(&key(b"9007199254740993")),
            Ordering::Less
        );
        assert_eq!(
            key(b"0.10000000000000000001").cmp(&key(b"0.1")),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_numeric_breaks_ties_lexically() {
        let options = SortOptions {
            numeric: true,
            ..SortOptions::default()
        };

        assert_eq!(options.compare(b"10", b"9"), Ordering::Greater);
        assert_eq!(options.compare(b"01", b"1"), Ordering::Less);
        assert_eq!(options.compare_keys(b"01", b"1"), Ordering::Equal);
    }

    #[test]
    fn test_compare_reverse() {
        let options = SortOptions {
            reverse: true,
            ..SortOptions::default()
        };

        assert_eq!(options.compare(b"a", b"b"), Ordering::Greater);
    }
}
