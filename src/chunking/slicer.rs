//! Fixed-size slicing.
//!
//! Splits a text into consecutive slices of exactly `budget` characters,
//! with a shorter final slice holding the remainder. Slices borrow from
//! the input and never split a multi-byte character.

use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// Lazy iterator over fixed-size slices of a text.
///
/// Cloning the iterator restarts it from the clone point, so a fresh
/// `slices(text, budget)` call can be replayed any number of times.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use codechunk::chunking::slices;
///
/// let budget = NonZeroUsize::new(4).unwrap();
/// let parts: Vec<&str> = slices("abcdefghij", budget).collect();
/// assert_eq!(parts, vec!["abcd", "efgh", "ij"]);
/// assert_eq!(slices("", budget).count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Slices<'a> {
    rest: &'a str,
    budget: NonZeroUsize,
}

/// Slices `text` into pieces of `budget` characters.
#[must_use]
pub const fn slices(text: &str, budget: NonZeroUsize) -> Slices<'_> {
    Slices { rest: text, budget }
}

impl<'a> Iterator for Slices<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        // Byte offset just past the `budget`-th character, or the end.
        let end = self
            .rest
            .char_indices()
            .nth(self.budget.get())
            .map_or(self.rest.len(), |(offset, _)| offset);

        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.rest.is_empty() {
            return (0, Some(0));
        }
        // Every character is at most 4 bytes and at least 1.
        let budget = self.budget.get();
        let min_chars = self.rest.len().div_ceil(4);
        (
            min_chars.div_ceil(budget),
            Some(self.rest.len().div_ceil(budget)),
        )
    }
}

impl FusedIterator for Slices<'_> {}
