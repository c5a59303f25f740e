use std::cmp::Ordering;
use twinflow_error::Result;

type Source<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// Low-level ordered merge that combines multiple sorted sources.
/// Items are emitted smallest first according to the comparator.
///
/// At most one item per source is held at a time, and a source is only pulled
/// when its slot is empty, so nothing is read beyond what the next emission
/// needs. Equal items are emitted in source order. A source error is yielded
/// once, after which the merge ends.
pub struct OrderedMerge<'a, T, F> {
    sources: Vec<Source<'a, T>>,
    buffered: Vec<Option<T>>,
    finished: Vec<bool>,
    compare: F,
    failed: bool,
}

impl<'a, T, F> OrderedMerge<'a, T, F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    #[must_use]
    pub fn new<I>(sources: Vec<I>, compare: F) -> Self
    where
        I: IntoIterator<Item = Result<T>>,
        I::IntoIter: 'a,
    {
        let count = sources.len();
        let sources = sources
            .into_iter()
            .map(|source| Box::new(source.into_iter()) as Source<'a, T>)
            .collect::<Vec<_>>();

        Self {
            sources,
            buffered: (0..count).map(|_| None).collect(),
            finished: vec![false; count],
            compare,
            failed: false,
        }
    }
}

impl<T, F> Iterator for OrderedMerge<'_, T, F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        // Pull sources to fill empty buffer slots
        for i in 0..self.sources.len() {
            if self.buffered[i].is_some() || self.finished[i] {
                continue;
            }
            match self.sources[i].next() {
                Some(Ok(item)) => self.buffered[i] = Some(item),
                Some(Err(e)) => {
                    self.failed = true;
                    return Some(Err(e));
                }
                None => self.finished[i] = true,
            }
        }

        // Find the minimum item, keeping the earliest source on ties
        let mut min_idx = None;
        for (i, item) in self.buffered.iter().enumerate() {
            let Some(val) = item else { continue };
            let is_smaller = match min_idx {
                None => true,
                Some(curr) => match &self.buffered[curr] {
                    Some(curr_val) => (self.compare)(val, curr_val) == Ordering::Less,
                    None => true,
                },
            };
            if is_smaller {
                min_idx = Some(i);
            }
        }

        min_idx
            .and_then(|idx| self.buffered[idx].take())
            .map(Ok)
    }
}

/// Extension trait for merging a vector of sorted sources.
pub trait OrderedMergeExt<'a, T> {
    /// Merges the sources, emitting items in the order given by `compare`.
    fn ordered_merge_by<F>(self, compare: F) -> OrderedMerge<'a, T, F>
    where
        F: FnMut(&T, &T) -> Ordering;

    /// Merges the sources, emitting items in their `Ord` order.
    fn ordered_merge(self) -> OrderedMerge<'a, T, fn(&T, &T) -> Ordering>
    where
        T: Ord;
}

impl<'a, T, I> OrderedMergeExt<'a, T> for Vec<I>
where
    I: IntoIterator<Item = Result<T>>,
    I::IntoIter: 'a,
{
    fn ordered_merge_by<F>(self, compare: F) -> OrderedMerge<'a, T, F>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        OrderedMerge::new(self, compare)
    }

    fn ordered_merge(self) -> OrderedMerge<'a, T, fn(&T, &T) -> Ordering>
    where
        T: Ord,
    {
        OrderedMerge::new(self, T::cmp as fn(&T, &T) -> Ordering)
    }
}
