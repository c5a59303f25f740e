// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Input fixtures shaped like the partial outputs of split shell commands.

/// Join `lines` into newline-terminated text.
#[must_use]
pub fn text(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// `count` lines of the form `<prefix><n>`, numbered from 1.
#[must_use]
pub fn numbered_lines(prefix: &str, count: usize) -> String {
    (1..=count).map(|n| format!("{prefix}{n}\n")).collect()
}

/// First half of a sorted word list.
#[must_use]
pub fn sorted_fruits_a() -> String {
    text(&["apple", "cherry", "grape", "mango"])
}

/// Second half of a sorted word list, interleaving with [`sorted_fruits_a`].
#[must_use]
pub fn sorted_fruits_b() -> String {
    text(&["banana", "cherry", "kiwi", "orange", "pear"])
}

/// Numerically sorted values whose lexical order differs.
#[must_use]
pub fn sorted_numbers_a() -> String {
    text(&["2", "10", "33"])
}

/// Numerically sorted values interleaving with [`sorted_numbers_a`].
#[must_use]
pub fn sorted_numbers_b() -> String {
    text(&["1", "9", "100"])
}

/// `uniq -c` output of the first half of a file.
#[must_use]
pub fn uniq_counts_a() -> String {
    text(&["      3 alpha", "      1 beta", "      2 gamma"])
}

/// `uniq -c` output of the second half, starting with the line the first half
/// ended with.
#[must_use]
pub fn uniq_counts_b() -> String {
    text(&["      4 gamma", "      1 delta"])
}

/// `wc` output (lines, words, bytes) of the first half of a file.
#[must_use]
pub fn wc_counts_a() -> String {
    text(&["      3      12      70"])
}

/// `wc` output of the second half.
#[must_use]
pub fn wc_counts_b() -> String {
    text(&["      5      20     111"])
}
