//! Core domain models for codechunk.
//!
//! Fragments and groups are pure data with no I/O dependencies, so the
//! aggregation core can be exercised without touching a filesystem.

pub mod fragment;
pub mod group;

pub use fragment::{Fragment, TREE_LABEL, char_len};
pub use group::Group;
