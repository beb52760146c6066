//! Output group representation.
//!
//! A group is what ends up in one output chunk file: one or more fragments
//! joined by the separator. Groups are only built by the aggregator.

use crate::core::Fragment;
use serde::Serialize;

/// An ordered, non-empty run of fragments bounded by the size budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    fragments: Vec<Fragment>,
    size: usize,
}

impl Group {
    /// Starts a group seeded with a single fragment.
    #[must_use]
    pub fn seed(fragment: Fragment) -> Self {
        let size = fragment.size();
        Self {
            fragments: vec![fragment],
            size,
        }
    }

    /// Appends a fragment, accounting for the separator placed before it.
    pub(crate) fn push(&mut self, fragment: Fragment, separator_size: usize) {
        self.size = self
            .size
            .saturating_add(separator_size)
            .saturating_add(fragment.size());
        self.fragments.push(fragment);
    }

    /// Size in characters, separators included.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the fragments in order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Number of fragments in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Always `false`; groups hold at least one fragment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Labels of the fragments, skipping unlabeled ones.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().filter_map(Fragment::label)
    }

    /// Joins the fragment texts with `separator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use codechunk::core::{Fragment, Group};
    ///
    /// let group = Group::seed(Fragment::new("a"));
    /// assert_eq!(group.render("\n\n"), "a");
    /// ```
    #[must_use]
    pub fn render(&self, separator: &str) -> String {
        let mut out = String::with_capacity(
            self.fragments
                .iter()
                .map(|f| f.text().len())
                .sum::<usize>()
                + separator.len() * self.fragments.len().saturating_sub(1),
        );
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(fragment.text());
        }
        out
    }

    /// Consumes the group and returns its fragments.
    #[must_use]
    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }
}
