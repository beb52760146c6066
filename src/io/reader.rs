//! File reading with memory mapping support.
//!
//! Small files are read directly; large ones are memory mapped. Content
//! is decoded as UTF-8 either strictly or with lossy replacement.

// Memory mapping requires unsafe but is well-documented and safe for read-only access
#![allow(unsafe_code)]

use crate::error::{IoError, Result};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Threshold for using memory mapping (1MB).
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Maximum file size to read into memory (1GB).
const MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// How undecodable bytes are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Replace invalid sequences with U+FFFD and keep going.
    #[default]
    Lossy,
    /// Fail on the first invalid sequence.
    Strict,
}

/// File reader with support for memory mapping.
///
/// # Examples
///
/// ```no_run
/// use codechunk::io::{DecodeMode, FileReader};
///
/// let reader = FileReader::open("src/main.rs").unwrap();
/// let content = reader.read_text(DecodeMode::Lossy).unwrap();
/// ```
pub struct FileReader {
    file: File,
    size: u64,
    path: String,
}

impl FileReader {
    /// Opens a file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, can't be opened, or is
    /// larger than 1GB.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        if !path_ref.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }

        let file = File::open(path_ref).map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        let size = file
            .metadata()
            .map_err(|e| IoError::ReadFailed {
                path: path_str.clone(),
                reason: e.to_string(),
            })?
            .len();

        if size > MAX_FILE_SIZE {
            return Err(IoError::ReadFailed {
                path: path_str,
                reason: format!("file too large: {size} bytes (max: {MAX_FILE_SIZE} bytes)"),
            }
            .into());
        }

        Ok(Self {
            file,
            size,
            path: path_str,
        })
    }

    /// Reads the file content as bytes, memory mapping large files.
    pub fn read_to_bytes(&self) -> Result<Vec<u8>> {
        if self.size >= MMAP_THRESHOLD {
            self.read_mmap_bytes()
        } else {
            self.read_direct_bytes()
        }
    }

    /// Reads and decodes the file content.
    ///
    /// In [`DecodeMode::Lossy`] invalid sequences become U+FFFD and a
    /// warning is logged; in [`DecodeMode::Strict`] they are an error.
    pub fn read_text(&self, mode: DecodeMode) -> Result<String> {
        let bytes = self.read_to_bytes()?;
        decode(&self.path, bytes, mode)
    }

    fn read_mmap_bytes(&self) -> Result<Vec<u8>> {
        // Safety: We're only reading from the file, which is safe
        let mmap = unsafe {
            Mmap::map(&self.file).map_err(|e| IoError::MmapFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?
        };

        Ok(mmap.to_vec())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn read_direct_bytes(&self) -> Result<Vec<u8>> {
        let mut file = &self.file;
        let mut buffer = Vec::with_capacity(self.size as usize);
        file.read_to_end(&mut buffer)
            .map_err(|e| IoError::ReadFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(buffer)
    }
}

/// Decodes `bytes` read from `path` according to `mode`.
fn decode(path: &str, bytes: Vec<u8>, mode: DecodeMode) -> Result<String> {
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => match mode {
            DecodeMode::Strict => Err(IoError::InvalidUtf8 {
                path: path.to_string(),
                offset: err.utf8_error().valid_up_to(),
            }
            .into()),
            DecodeMode::Lossy => {
                let bytes = err.into_bytes();
                let text = String::from_utf8_lossy(&bytes).into_owned();
                tracing::warn!(path, "replaced invalid UTF-8 sequences");
                Ok(text)
            }
        },
    }
}

/// Reads a file to string with the given decode mode.
///
/// The file handle is closed before this returns.
///
/// # Examples
///
/// ```no_run
/// use codechunk::io::{DecodeMode, read_file};
///
/// let content = read_file("example.txt", DecodeMode::Strict).unwrap();
/// ```
pub fn read_file<P: AsRef<Path>>(path: P, mode: DecodeMode) -> Result<String> {
    FileReader::open(path)?.read_text(mode)
}
