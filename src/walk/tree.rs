//! Directory tree rendering.
//!
//! Renders the visible part of a directory in the style of the `tree`
//! command, with siblings sorted by file name.

use crate::error::{IoError, Result};
use crate::walk::{ExclusionPolicy, walker};
use std::path::Path;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// One visible entry, in depth-first order.
struct TreeEntry {
    depth: usize,
    name: String,
}

/// Renders the tree under `root`, omitting excluded entries.
///
/// The first line is the root's directory name. Lines are joined with
/// `\n` and there is no trailing newline.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved or a directory cannot
/// be listed.
pub fn render_tree(root: &Path, policy: &ExclusionPolicy) -> Result<String> {
    let entries = visible_entries(root, policy)?;
    let last_flags = last_sibling_flags(&entries);

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(root_name(root)?);

    // is-last flag of each ancestor below the root
    let mut ancestors: Vec<bool> = Vec::new();
    for (entry, &is_last) in entries.iter().zip(&last_flags) {
        ancestors.truncate(entry.depth - 1);

        let mut line = String::from(SPACE_INDENT);
        for &ancestor_last in &ancestors {
            line.push_str(if ancestor_last { SPACE_INDENT } else { PIPE_INDENT });
        }
        line.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        line.push_str(&entry.name);
        lines.push(line);

        ancestors.push(is_last);
    }

    Ok(lines.join("\n"))
}

fn visible_entries(root: &Path, policy: &ExclusionPolicy) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let mut walk = walker(root).into_iter();

    while let Some(entry) = walk.next() {
        let entry = entry?;
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let is_dir = entry.file_type().is_dir();

        if policy.excludes(rel, is_dir) {
            if is_dir {
                walk.skip_current_dir();
            }
            continue;
        }

        entries.push(TreeEntry {
            depth: entry.depth(),
            name: entry.file_name().to_string_lossy().to_string(),
        });
    }

    Ok(entries)
}

/// For each entry, whether it is the last visible child of its parent.
fn last_sibling_flags(entries: &[TreeEntry]) -> Vec<bool> {
    let mut flags = vec![false; entries.len()];
    // later_sibling[d]: an entry at depth d follows within the same parent
    let mut later_sibling: Vec<bool> = Vec::new();

    for (i, entry) in entries.iter().enumerate().rev() {
        if later_sibling.len() <= entry.depth {
            later_sibling.resize(entry.depth + 1, false);
        }
        flags[i] = !later_sibling[entry.depth];
        later_sibling[entry.depth] = true;
        later_sibling.truncate(entry.depth + 1);
    }

    flags
}

fn root_name(root: &Path) -> Result<String> {
    let absolute = std::path::absolute(root).map_err(|e| IoError::ReadFailed {
        path: root.to_string_lossy().to_string(),
        reason: e.to_string(),
    })?;

    if let Some(name) = absolute.file_name() {
        return Ok(name.to_string_lossy().to_string());
    }

    // `..` or `/`: resolve fully before giving up on a name.
    let canonical = absolute.canonicalize().map_err(|e| IoError::ReadFailed {
        path: absolute.to_string_lossy().to_string(),
        reason: e.to_string(),
    })?;
    Ok(canonical.file_name().map_or_else(
        || canonical.to_string_lossy().to_string(),
        |name| name.to_string_lossy().to_string(),
    ))
}
