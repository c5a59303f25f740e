// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::cell::Cell;
use twinflow_error::{AggregateError, Result};
use twinflow_ordered_merge::{OrderedMerge, OrderedMergeExt};

fn source(items: &[i32]) -> Vec<Result<i32>> {
    items.iter().copied().map(Ok).collect()
}

#[test]
fn test_ordered_merge_interleaves_two_sources() -> anyhow::Result<()> {
    // Arrange
    let sources = vec![source(&[1, 4, 6]), source(&[2, 3, 7])];

    // Act
    let merged = sources.ordered_merge().collect::<Result<Vec<_>>>()?;

    // Assert
    assert_eq!(merged, vec![1, 2, 3, 4, 6, 7]);
    Ok(())
}

#[test]
fn test_ordered_merge_empty_sources() {
    let sources: Vec<Vec<Result<i32>>> = vec![vec![], vec![]];

    let mut merged = sources.ordered_merge();

    assert!(merged.next().is_none(), "Expected no items from empty sources");
}

#[test]
fn test_ordered_merge_one_empty_source() -> anyhow::Result<()> {
    let sources = vec![source(&[]), source(&[5, 8])];

    let merged = sources.ordered_merge().collect::<Result<Vec<_>>>()?;

    assert_eq!(merged, vec![5, 8]);
    Ok(())
}

#[test]
fn test_ordered_merge_single_source() -> anyhow::Result<()> {
    let sources = vec![source(&[1, 2, 3])];

    let merged = sources.ordered_merge().collect::<Result<Vec<_>>>()?;

    assert_eq!(merged, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn test_ordered_merge_ties_prefer_earlier_source() -> anyhow::Result<()> {
    // Arrange: items compare equal by key but carry their origin
    let left: Vec<Result<(i32, char)>> = vec![Ok((1, 'l')), Ok((2, 'l'))];
    let right: Vec<Result<(i32, char)>> = vec![Ok((1, 'r')), Ok((2, 'r'))];

    // Act
    let merged = vec![left, right]
        .ordered_merge_by(|a, b| a.0.cmp(&b.0))
        .collect::<Result<Vec<_>>>()?;

    // Assert
    assert_eq!(merged, vec![(1, 'l'), (1, 'r'), (2, 'l'), (2, 'r')]);
    Ok(())
}

#[test]
fn test_ordered_merge_reverse_comparator() -> anyhow::Result<()> {
    let sources = vec![source(&[9, 5, 1]), source(&[8, 2])];

    let merged = sources
        .ordered_merge_by(|a, b| b.cmp(a))
        .collect::<Result<Vec<_>>>()?;

    assert_eq!(merged, vec![9, 8, 5, 2, 1]);
    Ok(())
}

#[test]
fn test_ordered_merge_three_sources() -> anyhow::Result<()> {
    let sources = vec![source(&[3, 6]), source(&[1, 5]), source(&[2, 4])];

    let merged = OrderedMerge::new(sources, i32::cmp).collect::<Result<Vec<_>>>()?;

    assert_eq!(merged, vec![1, 2, 3, 4, 5, 6]);
    Ok(())
}

#[test]
fn test_ordered_merge_error_ends_merge() {
    // Arrange
    let failing = vec![
        Ok(1),
        Err(AggregateError::input_failed("input1", "broken")),
        Ok(10),
    ];
    let healthy = source(&[2, 3]);

    // Act
    let items: Vec<_> = vec![failing, healthy].ordered_merge().collect();

    // Assert
    assert_eq!(items.len(), 2);
    assert!(matches!(items[0], Ok(1)));
    assert!(matches!(items[1], Err(AggregateError::InputFailed { .. })));
}

#[test]
fn test_ordered_merge_pulls_lazily() {
    // Arrange
    let pulled = Cell::new(0usize);
    let counting = |items: Vec<i32>| {
        let pulled = &pulled;
        items.into_iter().map(move |item| {
            pulled.set(pulled.get() + 1);
            Ok::<i32, AggregateError>(item)
        })
    };
    let mut merged = vec![counting(vec![1, 3, 5]), counting(vec![2, 4, 6])]
        .ordered_merge_by(|a: &i32, b: &i32| a.cmp(b));

    // Act & Assert: one item buffered per source, refilled only after use
    assert!(matches!(merged.next(), Some(Ok(1))));
    assert_eq!(pulled.get(), 2);
    assert!(matches!(merged.next(), Some(Ok(2))));
    assert_eq!(pulled.get(), 3);
    assert!(matches!(merged.next(), Some(Ok(3))));
    assert_eq!(pulled.get(), 4);
}

#[test]
fn test_ordered_merge_large_volume() -> anyhow::Result<()> {
    let evens: Vec<Result<u32>> = (0..500).map(|n| Ok(n * 2)).collect();
    let odds: Vec<Result<u32>> = (0..500).map(|n| Ok(n * 2 + 1)).collect();

    let merged = vec![evens, odds]
        .ordered_merge()
        .collect::<Result<Vec<_>>>()?;

    assert_eq!(merged.len(), 1000);
    assert!(merged.windows(2).all(|pair| pair[0] < pair[1]));
    Ok(())
}
