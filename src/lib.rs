//! # codechunk
//!
//! Splits a codebase into bounded-size text chunks for pasting into a
//! fixed-size LLM context window.
//!
//! The directory is walked with configured files and folders excluded. A
//! `tree`-style listing and the content of every remaining file are cut
//! into labeled fragments, which are then greedily packed into groups that
//! never exceed a character budget (unless a single fragment already does).
//!
//! ## Features
//!
//! - **Greedy aggregation**: order-preserving packing with a soft budget
//! - **Exclusion rules**: by file name, extension, or folder path segment
//! - **Explicit configuration**: TOML file or CLI flags, no global state
//! - **Decode modes**: lossy or strict UTF-8 handling
//!
//! ```no_run
//! use std::path::Path;
//! use codechunk::{ChunkerConfig, chunk_codebase};
//!
//! let chunked = chunk_codebase(Path::new("."), &ChunkerConfig::default()).unwrap();
//! for group in &chunked.groups {
//!     println!("{} chars", group.size());
//! }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod chunking;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod walk;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

pub use config::ChunkerConfig;
pub use core::{Fragment, Group};

pub use chunking::{AggregateExt, Aggregator, aggregate, slices};

pub use io::{DecodeMode, DirectorySink, MemorySink, Sink};

pub use walk::ExclusionPolicy;

pub use pipeline::{Chunked, RunSummary, chunk_codebase, run, run_with_sink};

pub use cli::{Cli, OutputFormat};
