//! Error types for codechunk operations.
//!
//! This module provides the error hierarchy using `thiserror` for chunking,
//! filesystem I/O, configuration, and CLI commands.

use thiserror::Error;

/// Result type alias for codechunk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Chunking-related errors (slicing and aggregation).
    #[error("chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    /// I/O errors (traversal, reading, writing).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Chunking-specific errors.
#[derive(Error, Debug)]
pub enum ChunkingError {
    /// The size budget must be a positive integer.
    #[error("budget must be > 0")]
    ZeroBudget,
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// File content is not valid UTF-8 (strict decoding only).
    #[error("invalid UTF-8 in {path} at byte offset {offset}")]
    InvalidUtf8 {
        /// Path to the file.
        path: String,
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory traversal error.
    #[error("failed to walk directory: {path}: {reason}")]
    WalkFailed {
        /// Path where traversal failed.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<walkdir::Error> for IoError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map_or_else(String::new, |p| p.to_string_lossy().to_string());
        let reason = err
            .io_error()
            .map_or_else(|| err.to_string(), ToString::to_string);
        Self::WalkFailed { path, reason }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Self::Io(err.into())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
