//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::config::ChunkerConfig;
use crate::error::Result;
use crate::io::DecodeMode;
use clap::Parser;
use std::path::PathBuf;

/// codechunk: split a codebase into bounded-size text chunks.
///
/// Writes a tree listing of the project followed by the content of every
/// included file into `chunk_<i>_of_<N>.txt` files, each at most the
/// budget in characters unless a single slice is already larger.
#[derive(Parser, Debug)]
#[command(name = "codechunk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Root directory of the codebase to chunk.
    pub root: PathBuf,

    /// Directory to write chunk files into (created if missing).
    pub output_dir: PathBuf,

    /// Path to a TOML configuration file.
    #[arg(short, long, env = "CODECHUNK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum chunk size in characters.
    #[arg(short, long)]
    pub budget: Option<usize>,

    /// Additional file extension to exclude (repeatable).
    #[arg(long = "exclude-ext", value_name = "EXT")]
    pub exclude_ext: Vec<String>,

    /// Additional exact file name to exclude (repeatable).
    #[arg(long = "exclude-file", value_name = "NAME")]
    pub exclude_file: Vec<String>,

    /// Additional folder name to exclude (repeatable).
    #[arg(long = "exclude-folder", value_name = "NAME")]
    pub exclude_folder: Vec<String>,

    /// Pack the tree and the files in one pass instead of two.
    #[arg(long)]
    pub pooled: bool,

    /// Fail on files that are not valid UTF-8 instead of replacing bytes.
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl Cli {
    /// Builds the effective configuration: defaults, then the config
    /// file, then command-line flags.
    pub fn resolve_config(&self) -> Result<ChunkerConfig> {
        let mut config = match &self.config {
            Some(path) => ChunkerConfig::load(path)?,
            None => ChunkerConfig::default(),
        };

        if let Some(budget) = self.budget {
            config.budget = budget;
        }
        for ext in &self.exclude_ext {
            config.exclude_extension(ext);
        }
        config
            .excluded_filenames
            .extend(self.exclude_file.iter().cloned());
        config
            .excluded_folders
            .extend(self.exclude_folder.iter().cloned());
        if self.pooled {
            config.separate_sections = false;
        }
        if self.strict {
            config.decode_mode = DecodeMode::Strict;
        }

        config.validate()?;
        Ok(config)
    }
}
