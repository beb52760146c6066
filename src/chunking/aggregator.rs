//! Greedy chunk aggregation.
//!
//! Packs an ordered stream of fragments into groups that stay within a
//! character budget. Fragments are never split and never reordered; a
//! fragment larger than the budget on its own becomes a singleton group.

use crate::core::{Fragment, Group, char_len};
use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// Push-based greedy aggregator.
///
/// Feed fragments with [`Aggregator::push`]; each call returns the group
/// that had to be flushed to make room, if any. Call
/// [`Aggregator::finish`] once input is exhausted to collect the tail.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use codechunk::chunking::Aggregator;
/// use codechunk::core::Fragment;
///
/// let mut agg = Aggregator::new(NonZeroUsize::new(6).unwrap(), "\n\n");
/// assert!(agg.push(Fragment::new("ab")).is_none());
/// assert!(agg.push(Fragment::new("cd")).is_none()); // "ab\n\ncd" is 6
/// let flushed = agg.push(Fragment::new("e")).unwrap();
/// assert_eq!(flushed.render("\n\n"), "ab\n\ncd");
/// assert_eq!(agg.finish().unwrap().render("\n\n"), "e");
/// ```
#[derive(Debug, Clone)]
pub struct Aggregator {
    budget: NonZeroUsize,
    separator_size: usize,
    current: Option<Group>,
}

impl Aggregator {
    /// Creates an aggregator for the given budget and separator.
    #[must_use]
    pub fn new(budget: NonZeroUsize, separator: &str) -> Self {
        Self {
            budget,
            separator_size: char_len(separator),
            current: None,
        }
    }

    /// Returns the budget.
    #[must_use]
    pub const fn budget(&self) -> NonZeroUsize {
        self.budget
    }

    /// Size the current group would have with `fragment` appended.
    fn candidate_size(&self, fragment: &Fragment) -> usize {
        self.current.as_ref().map_or(fragment.size(), |group| {
            group
                .size()
                .saturating_add(self.separator_size)
                .saturating_add(fragment.size())
        })
    }

    /// Adds a fragment, returning the previous group if it had to be flushed.
    pub fn push(&mut self, fragment: Fragment) -> Option<Group> {
        let overflows = self.candidate_size(&fragment) > self.budget.get();

        if overflows && fragment.size() > self.budget.get() {
            tracing::debug!(
                size = fragment.size(),
                budget = self.budget.get(),
                label = fragment.label().unwrap_or("-"),
                "fragment exceeds budget on its own"
            );
        }

        if overflows && self.current.is_some() {
            let flushed = self.current.replace(Group::seed(fragment));
            if let Some(group) = &flushed {
                tracing::debug!(size = group.size(), fragments = group.len(), "flushed group");
            }
            return flushed;
        }

        if let Some(group) = self.current.as_mut() {
            group.push(fragment, self.separator_size);
        } else {
            self.current = Some(Group::seed(fragment));
        }
        None
    }

    /// Flushes the in-progress group, if any.
    #[must_use]
    pub fn finish(self) -> Option<Group> {
        self.current
    }
}

/// Lazy iterator adapter yielding groups from a fragment iterator.
#[derive(Debug, Clone)]
pub struct Groups<I> {
    fragments: I,
    aggregator: Option<Aggregator>,
}

impl<I> Iterator for Groups<I>
where
    I: Iterator<Item = Fragment>,
{
    type Item = Group;

    fn next(&mut self) -> Option<Self::Item> {
        let aggregator = self.aggregator.as_mut()?;
        for fragment in self.fragments.by_ref() {
            if let Some(group) = aggregator.push(fragment) {
                return Some(group);
            }
        }
        self.aggregator.take().and_then(Aggregator::finish)
    }
}

impl<I> FusedIterator for Groups<I> where I: Iterator<Item = Fragment> {}

/// Extension trait adding `.aggregate(..)` to fragment iterators.
pub trait AggregateExt: Iterator<Item = Fragment> + Sized {
    /// Greedily packs the fragments into groups within `budget`.
    fn aggregate(self, budget: NonZeroUsize, separator: &str) -> Groups<Self> {
        Groups {
            fragments: self,
            aggregator: Some(Aggregator::new(budget, separator)),
        }
    }
}

impl<I: Iterator<Item = Fragment>> AggregateExt for I {}

/// Packs `fragments` into groups, collecting them.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use codechunk::chunking::aggregate;
/// use codechunk::core::Fragment;
///
/// let groups = aggregate(
///     vec![Fragment::new("a"), Fragment::new("b")],
///     NonZeroUsize::new(8000).unwrap(),
///     "\n\n",
/// );
/// assert_eq!(groups.len(), 1);
/// ```
pub fn aggregate<I>(fragments: I, budget: NonZeroUsize, separator: &str) -> Vec<Group>
where
    I: IntoIterator<Item = Fragment>,
{
    fragments.into_iter().aggregate(budget, separator).collect()
}
