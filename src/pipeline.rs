//! End-to-end chunking pipeline.
//!
//! Wires the fragment source, the aggregator, and a sink together
//! according to a [`ChunkerConfig`].

use crate::chunking::{AggregateExt, Aggregator};
use crate::config::ChunkerConfig;
use crate::core::Group;
use crate::error::{CommandError, Result};
use crate::io::{DirectorySink, Sink};
use crate::walk::{ExclusionPolicy, FileFragments, tree_fragments};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Number of chunk files written.
    pub chunk_count: usize,
    /// Directory the chunks were written to.
    pub output_dir: PathBuf,
    /// Files that were read (empty ones included).
    pub files_included: usize,
    /// Fragments packed into the chunks.
    pub fragment_count: usize,
    /// Per-chunk details, in output order.
    pub chunks: Vec<ChunkSummary>,
}

/// Details about one written chunk.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkSummary {
    /// Where the chunk was written.
    pub path: PathBuf,
    /// Size in characters.
    pub size: usize,
    /// Number of fragments in the chunk.
    pub fragments: usize,
}

/// Groups produced for a codebase, before rendering.
#[derive(Debug, Clone)]
pub struct Chunked {
    /// Groups in output order.
    pub groups: Vec<Group>,
    /// Files that were read.
    pub files_included: usize,
}

/// Walks `root` and aggregates its tree and files into groups.
///
/// With `separate_sections` the tree and the files are packed in two
/// independent passes, tree groups first. Otherwise a single pass packs
/// the tree fragments followed by the file fragments.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, `root` is not a
/// directory, or any entry cannot be listed or read.
pub fn chunk_codebase(root: &Path, config: &ChunkerConfig) -> Result<Chunked> {
    let budget = config.budget()?;

    if !root.is_dir() {
        return Err(CommandError::InvalidArgument(format!(
            "codebase root is not a directory: {}",
            root.display()
        ))
        .into());
    }

    let policy = ExclusionPolicy::from_config(config);
    let tree = tree_fragments(root, &policy, budget)?;
    let mut files = FileFragments::new(root, policy, budget, config.decode_mode);

    let mut groups: Vec<Group> = Vec::new();
    let mut aggregator = Aggregator::new(budget, &config.separator);

    if config.separate_sections {
        groups.extend(tree.into_iter().aggregate(budget, &config.separator));
    } else {
        for fragment in tree {
            groups.extend(aggregator.push(fragment));
        }
    }

    for fragment in files.by_ref() {
        groups.extend(aggregator.push(fragment?));
    }
    groups.extend(aggregator.finish());

    tracing::debug!(
        groups = groups.len(),
        files = files.files_read(),
        separate_sections = config.separate_sections,
        "aggregated codebase"
    );

    Ok(Chunked {
        groups,
        files_included: files.files_read(),
    })
}

/// Chunks `root` and hands the rendered groups to `sink`.
pub fn run_with_sink<S: Sink>(
    root: &Path,
    output_dir: &Path,
    config: &ChunkerConfig,
    sink: &mut S,
) -> Result<RunSummary> {
    let chunked = chunk_codebase(root, config)?;

    let rendered: Vec<String> = chunked
        .groups
        .iter()
        .map(|group| group.render(&config.separator))
        .collect();
    let paths = sink.write_groups(&rendered)?;

    let chunks: Vec<ChunkSummary> = chunked
        .groups
        .iter()
        .zip(paths)
        .map(|(group, path)| ChunkSummary {
            path,
            size: group.size(),
            fragments: group.len(),
        })
        .collect();

    let summary = RunSummary {
        chunk_count: chunks.len(),
        output_dir: output_dir.to_path_buf(),
        files_included: chunked.files_included,
        fragment_count: chunked.groups.iter().map(Group::len).sum(),
        chunks,
    };

    tracing::info!(
        chunks = summary.chunk_count,
        files = summary.files_included,
        output_dir = %output_dir.display(),
        "chunking complete"
    );

    Ok(summary)
}

/// Chunks `root` and writes `chunk_<i>_of_<N>.txt` files into `output_dir`.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use codechunk::{ChunkerConfig, run};
///
/// let summary = run(Path::new("."), Path::new("chunks"), &ChunkerConfig::default()).unwrap();
/// println!("{} chunk(s)", summary.chunk_count);
/// ```
pub fn run(root: &Path, output_dir: &Path, config: &ChunkerConfig) -> Result<RunSummary> {
    let mut sink = DirectorySink::new(output_dir);
    run_with_sink(root, output_dir, config, &mut sink)
}
