//! Output sinks for rendered groups.
//!
//! A sink receives the complete, ordered list of rendered groups so it can
//! number them `1..=N` with the total known up front.

use crate::error::{IoError, Result};
use std::path::{Path, PathBuf};

/// Destination for rendered chunk texts.
pub trait Sink {
    /// Persists `chunks` in order, returning where each one went.
    fn write_groups(&mut self, chunks: &[String]) -> Result<Vec<PathBuf>>;
}

/// Name of the `index`-th (1-based) of `total` chunk files.
///
/// # Examples
///
/// ```
/// use codechunk::io::chunk_file_name;
///
/// assert_eq!(chunk_file_name(2, 5), "chunk_2_of_5.txt");
/// ```
#[must_use]
pub fn chunk_file_name(index: usize, total: usize) -> String {
    format!("chunk_{index}_of_{total}.txt")
}

/// Writes each chunk to `chunk_<i>_of_<N>.txt` inside a directory.
///
/// The directory (and any missing parents) is created on first write.
/// Existing files with the same names are overwritten.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    out_dir: PathBuf,
}

impl DirectorySink {
    /// Creates a sink writing into `out_dir`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.out_dir.exists() {
            std::fs::create_dir_all(&self.out_dir).map_err(|e| IoError::DirectoryFailed {
                path: self.out_dir.to_string_lossy().to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

impl Sink for DirectorySink {
    fn write_groups(&mut self, chunks: &[String]) -> Result<Vec<PathBuf>> {
        self.ensure_dir()?;

        let total = chunks.len();
        let mut paths = Vec::with_capacity(total);

        for (i, content) in chunks.iter().enumerate() {
            let file_path = self.out_dir.join(chunk_file_name(i + 1, total));

            std::fs::write(&file_path, content).map_err(|e| IoError::WriteFailed {
                path: file_path.to_string_lossy().to_string(),
                reason: e.to_string(),
            })?;

            tracing::debug!(path = %file_path.display(), bytes = content.len(), "wrote chunk");
            paths.push(file_path);
        }

        Ok(paths)
    }
}

/// Keeps chunks in memory; useful for library callers and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    chunks: Vec<(PathBuf, String)>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored chunks with their would-be file names.
    #[must_use]
    pub fn chunks(&self) -> &[(PathBuf, String)] {
        &self.chunks
    }
}

impl Sink for MemorySink {
    fn write_groups(&mut self, chunks: &[String]) -> Result<Vec<PathBuf>> {
        let total = chunks.len();
        self.chunks = chunks
            .iter()
            .enumerate()
            .map(|(i, c)| (PathBuf::from(chunk_file_name(i + 1, total)), c.clone()))
            .collect();
        Ok(self.chunks.iter().map(|(p, _)| p.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_sink_writes_numbered_files() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("chunks");

        let mut sink = DirectorySink::new(&out_dir);
        let paths = sink
            .write_groups(&["First".to_string(), "Second".to_string()])
            .unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("chunk_1_of_2.txt"));
        assert!(paths[1].ends_with("chunk_2_of_2.txt"));
        assert_eq!(std::fs::read_to_string(&paths[0]).unwrap(), "First");
        assert_eq!(std::fs::read_to_string(&paths[1]).unwrap(), "Second");
    }

    #[test]
    fn test_directory_sink_creates_nested_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("a/b/c");
        assert!(!out_dir.exists());

        DirectorySink::new(&out_dir)
            .write_groups(&["x".to_string()])
            .unwrap();

        assert!(out_dir.join("chunk_1_of_1.txt").exists());
    }

    #[test]
    fn test_directory_sink_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let existing = temp_dir.path().join("chunk_1_of_1.txt");
        std::fs::write(&existing, "stale content").unwrap();

        DirectorySink::new(temp_dir.path())
            .write_groups(&["fresh".to_string()])
            .unwrap();

        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "fresh");
    }

    #[test]
    fn test_directory_sink_empty_still_creates_dir() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("empty");

        let paths = DirectorySink::new(&out_dir).write_groups(&[]).unwrap();

        assert!(paths.is_empty());
        assert!(out_dir.is_dir());
    }

    #[test]
    fn test_directory_sink_unwritable_target() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let result = DirectorySink::new(blocker.join("out")).write_groups(&["x".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        let paths = sink.write_groups(&["a".to_string()]).unwrap();
        assert_eq!(paths, vec![PathBuf::from("chunk_1_of_1.txt")]);
        assert_eq!(sink.chunks()[0].1, "a");
    }
}
