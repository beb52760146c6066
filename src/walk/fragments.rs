//! Fragment source.
//!
//! Turns a directory into the ordered fragment stream fed to the
//! aggregator: the tree listing first, then every included file's content
//! sliced to the budget with a header in front of each slice.

use crate::chunking::{TREE_HEADER, file_header, slices};
use crate::core::{Fragment, TREE_LABEL};
use crate::error::{IoError, Result};
use crate::io::{DecodeMode, FileReader};
use crate::walk::{ExclusionPolicy, render_tree, walker};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Renders the tree under `root` and slices it into fragments.
///
/// Only the first slice carries the tree header.
pub fn tree_fragments(
    root: &Path,
    policy: &ExclusionPolicy,
    budget: NonZeroUsize,
) -> Result<Vec<Fragment>> {
    let tree = render_tree(root, policy)?;
    let text = format!("{TREE_HEADER}{tree}");
    Ok(slices(&text, budget)
        .map(|slice| Fragment::labeled(TREE_LABEL, slice))
        .collect())
}

/// Slices one file's content into header-prefixed fragments.
///
/// Empty content yields no fragments at all.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use codechunk::walk::file_fragments;
///
/// let frags = file_fragments("src/a.txt", "hello", NonZeroUsize::new(3).unwrap());
/// assert_eq!(frags[0].text(), "# here is src/a.txt\n\nhel");
/// assert_eq!(frags[1].text(), "# here is src/a.txt\n\nlo");
/// assert!(file_fragments("empty.txt", "", NonZeroUsize::new(3).unwrap()).is_empty());
/// ```
#[must_use]
pub fn file_fragments(path: &str, content: &str, budget: NonZeroUsize) -> Vec<Fragment> {
    let header = file_header(path);
    slices(content, budget)
        .map(|slice| Fragment::labeled(path, format!("{header}{slice}")))
        .collect()
}

/// Lazy iterator over the fragments of every included file under a root.
///
/// Files are visited depth-first with siblings sorted by name. Each file
/// is opened, read fully, and closed before its fragments are yielded.
/// Symlinked directories are not followed. The first error ends the walk.
pub struct FileFragments {
    root: PathBuf,
    walk: walkdir::IntoIter,
    policy: ExclusionPolicy,
    budget: NonZeroUsize,
    decode_mode: DecodeMode,
    pending: VecDeque<Fragment>,
    files_read: usize,
    failed: bool,
}

impl FileFragments {
    /// Starts walking `root`.
    #[must_use]
    pub fn new(
        root: &Path,
        policy: ExclusionPolicy,
        budget: NonZeroUsize,
        decode_mode: DecodeMode,
    ) -> Self {
        Self {
            root: root.to_path_buf(),
            walk: walker(root).into_iter(),
            policy,
            budget,
            decode_mode,
            pending: VecDeque::new(),
            files_read: 0,
            failed: false,
        }
    }

    /// Number of files read so far, including empty ones.
    #[must_use]
    pub const fn files_read(&self) -> usize {
        self.files_read
    }

    /// Advances to the next included file and returns its fragments.
    fn next_file(&mut self) -> Option<Result<Vec<Fragment>>> {
        while let Some(entry) = self.walk.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err.into())),
            };
            let rel = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());

            if entry.file_type().is_dir() {
                if self.policy.excludes(rel, true) {
                    tracing::debug!(path = %rel.display(), "skipping excluded folder");
                    self.walk.skip_current_dir();
                }
                continue;
            }

            if self.policy.excludes(rel, false) {
                continue;
            }
            match resolves_to_file(&entry) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => return Some(Err(err)),
            }

            let path = entry.path().to_string_lossy().to_string();
            let content = match FileReader::open(entry.path())
                .and_then(|reader| reader.read_text(self.decode_mode))
            {
                Ok(content) => content,
                Err(err) => return Some(Err(err)),
            };
            self.files_read += 1;
            tracing::debug!(path = %path, chars = content.chars().count(), "read file");

            return Some(Ok(file_fragments(&path, &content, self.budget)));
        }
        None
    }
}

/// Whether an entry is, or links to, a regular file.
///
/// Symlinks are resolved; a dangling link is an error rather than a skip.
/// Directory links, FIFOs and sockets are not files.
fn resolves_to_file(entry: &walkdir::DirEntry) -> Result<bool> {
    if !entry.path_is_symlink() {
        return Ok(entry.file_type().is_file());
    }
    let path = entry.path().to_string_lossy().to_string();
    match std::fs::metadata(entry.path()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(IoError::FileNotFound { path }.into())
        }
        Err(err) => Err(IoError::ReadFailed {
            path,
            reason: err.to_string(),
        }
        .into()),
    }
}

impl Iterator for FileFragments {
    type Item = Result<Fragment>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(fragment) = self.pending.pop_front() {
                return Some(Ok(fragment));
            }
            if self.failed {
                return None;
            }
            match self.next_file()? {
                Ok(fragments) => self.pending.extend(fragments),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
