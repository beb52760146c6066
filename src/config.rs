//! Run configuration.
//!
//! Every knob that shapes the output lives in [`ChunkerConfig`], which is
//! passed explicitly into the traversal and aggregation entry points.
//! It can be loaded from a TOML file; missing keys fall back to defaults.

use crate::chunking::{DEFAULT_BUDGET, DEFAULT_SEPARATOR};
use crate::error::{ChunkingError, Error, Result};
use crate::io::DecodeMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::path::Path;

/// Extensions skipped by default.
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] =
    &[".png", ".jpg", ".jpeg", ".gif", ".zip", ".exe", ".db"];

/// Exact file names skipped by default.
pub const DEFAULT_EXCLUDED_FILENAMES: &[&str] = &[".DS_Store", "Dockerfile", ".gitignore"];

/// Folder names never descended into by default.
pub const DEFAULT_EXCLUDED_FOLDERS: &[&str] = &[
    ".git",
    ".github",
    ".idea",
    "node_modules",
    "dist",
    "venv",
    ".venv",
];

/// Configuration for a chunking run.
///
/// # Examples
///
/// ```
/// use codechunk::ChunkerConfig;
///
/// let config = ChunkerConfig::from_toml_str("budget = 4000\nseparate_sections = false").unwrap();
/// assert_eq!(config.budget, 4000);
/// assert!(!config.separate_sections);
/// assert!(config.excluded_folders.contains("node_modules"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Maximum group size in characters.
    pub budget: usize,

    /// Text placed between fragments that share a group.
    pub separator: String,

    /// Extensions to skip, with leading dot; compared case-insensitively.
    pub excluded_extensions: BTreeSet<String>,

    /// Exact file names to skip.
    pub excluded_filenames: BTreeSet<String>,

    /// Folder names to skip wherever they appear in a path.
    pub excluded_folders: BTreeSet<String>,

    /// Aggregate the tree and the files in separate passes.
    pub separate_sections: bool,

    /// How to handle file content that is not valid UTF-8.
    pub decode_mode: DecodeMode,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            separator: DEFAULT_SEPARATOR.to_string(),
            excluded_extensions: to_set(DEFAULT_EXCLUDED_EXTENSIONS),
            excluded_filenames: to_set(DEFAULT_EXCLUDED_FILENAMES),
            excluded_folders: to_set(DEFAULT_EXCLUDED_FOLDERS),
            separate_sections: true,
            decode_mode: DecodeMode::default(),
        }
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(ToString::to_string).collect()
}

impl ChunkerConfig {
    /// Parses a configuration from TOML text and validates it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks the configuration for values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.budget()?;
        Ok(())
    }

    /// Returns the budget as a non-zero value.
    pub fn budget(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.budget).ok_or_else(|| ChunkingError::ZeroBudget.into())
    }

    /// Adds an extension to the exclusion set, normalizing it.
    pub fn exclude_extension(&mut self, ext: &str) {
        self.excluded_extensions.insert(normalize_extension(ext));
    }

    /// Lower-cases extensions and ensures the leading dot.
    pub fn normalize(&mut self) {
        self.excluded_extensions = self
            .excluded_extensions
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect();
    }
}

/// Normalizes an extension to lower case with a leading dot.
fn normalize_extension(ext: &str) -> String {
    let lower = ext.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}
