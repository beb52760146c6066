//! Directory traversal for codechunk.
//!
//! - **Exclusion**: which entries are invisible
//! - **Tree**: the `tree`-style listing of what remains
//! - **Fragments**: the labeled fragment stream handed to the aggregator

pub mod exclusion;
pub mod fragments;
pub mod tree;

pub use exclusion::ExclusionPolicy;
pub use fragments::{FileFragments, file_fragments, tree_fragments};
pub use tree::render_tree;

use std::path::Path;
use walkdir::WalkDir;

/// Deterministic walker shared by the tree renderer and the file source.
fn walker(root: &Path) -> WalkDir {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
}
