//! Exclusion policy.
//!
//! Decides which filesystem entries are invisible to the rest of the
//! pipeline. Paths are evaluated relative to the traversal root, so the
//! location of the root itself never causes exclusions.

use crate::config::ChunkerConfig;
use std::collections::BTreeSet;
use std::path::{Component, Path};

/// Pure predicate over paths built from the configured rule sets.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use codechunk::{ChunkerConfig, walk::ExclusionPolicy};
///
/// let policy = ExclusionPolicy::from_config(&ChunkerConfig::default());
/// assert!(policy.excludes(Path::new("logo.PNG"), false));
/// assert!(policy.excludes(Path::new("web/node_modules"), true));
/// assert!(!policy.excludes(Path::new("mynode_modules.txt"), false));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExclusionPolicy {
    extensions: BTreeSet<String>,
    filenames: BTreeSet<String>,
    folders: BTreeSet<String>,
}

impl ExclusionPolicy {
    /// Builds the policy from a configuration.
    #[must_use]
    pub fn from_config(config: &ChunkerConfig) -> Self {
        Self {
            extensions: config
                .excluded_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            filenames: config.excluded_filenames.clone(),
            folders: config.excluded_folders.clone(),
        }
    }

    /// Whether a file should be skipped by name or extension.
    #[must_use]
    pub fn excludes_file(&self, path: &Path) -> bool {
        if let Some(name) = path.file_name()
            && self.filenames.contains(name.to_string_lossy().as_ref())
        {
            return true;
        }

        path.extension().is_some_and(|ext| {
            let ext_with_dot = format!(".{}", ext.to_string_lossy().to_lowercase());
            self.extensions.contains(&ext_with_dot)
        })
    }

    /// Whether any component of `path` is an excluded folder name.
    #[must_use]
    pub fn excludes_folder(&self, path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(name) => self.folders.contains(name.to_string_lossy().as_ref()),
            _ => false,
        })
    }

    /// Whether an entry at `path` (relative to the root) is excluded.
    ///
    /// Directories are matched against the folder rules. Files are
    /// excluded by their own name or extension, or by living under an
    /// excluded folder.
    #[must_use]
    pub fn excludes(&self, path: &Path, is_dir: bool) -> bool {
        if is_dir {
            return self.excludes_folder(path);
        }
        path.parent().is_some_and(|parent| self.excludes_folder(parent)) || self.excludes_file(path)
    }
}
