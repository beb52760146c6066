//! Fragment representation.
//!
//! A fragment is the indivisible unit of text handed to the aggregator.
//! The optional label records where the text came from and is only used
//! for diagnostics, never for packing decisions.

use serde::Serialize;

/// Label attached to fragments produced from the directory tree listing.
pub const TREE_LABEL: &str = "<tree>";

/// An immutable, labeled unit of text.
///
/// # Examples
///
/// ```
/// use codechunk::core::Fragment;
///
/// let fragment = Fragment::labeled("src/main.rs", "fn main() {}");
/// assert_eq!(fragment.size(), 12);
/// assert_eq!(fragment.label(), Some("src/main.rs"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    label: Option<String>,
    text: String,
    size: usize,
}

impl Fragment {
    /// Creates an unlabeled fragment.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let size = char_len(&text);
        Self {
            label: None,
            text,
            size,
        }
    }

    /// Creates a fragment with an origin label.
    #[must_use]
    pub fn labeled(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(text)
        }
    }

    /// Returns the origin label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the fragment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the size in characters.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Checks if the fragment holds no text.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Consumes the fragment and returns its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Length of `s` in characters, the unit every size in this crate uses.
#[must_use]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
