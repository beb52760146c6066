//! Slicing and aggregation of text fragments.
//!
//! - **Slicer**: splits one text into fixed-size character slices
//! - **Aggregator**: greedily packs fragments into groups bounded by a budget

pub mod aggregator;
pub mod slicer;

pub use aggregator::{AggregateExt, Aggregator, Groups, aggregate};
pub use slicer::{Slices, slices};

/// Default group budget in characters.
pub const DEFAULT_BUDGET: usize = 8000;

/// Default separator placed between fragments sharing a group.
pub const DEFAULT_SEPARATOR: &str = "\n\n";

/// Header preceding the directory tree listing.
pub const TREE_HEADER: &str = "# Here is the tree of the project (excluded items omitted):\n\n";

/// Builds the header preceding every slice of a file's content.
#[must_use]
pub fn file_header(path: &str) -> String {
    format!("# here is {path}\n\n")
}
