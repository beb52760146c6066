//! I/O utilities for codechunk.
//!
//! File reading with memory mapping and explicit decode modes, plus the
//! sinks that persist rendered chunks.

pub mod reader;
pub mod sink;

pub use reader::{DecodeMode, FileReader, read_file};
pub use sink::{DirectorySink, MemorySink, Sink, chunk_file_name};
