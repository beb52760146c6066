//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::error::Error;
use crate::pipeline::RunSummary;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats the completion summary of a run.
#[must_use]
pub fn format_summary(summary: &RunSummary, verbose: bool, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_summary_text(summary, verbose),
        OutputFormat::Json => format_json(summary),
    }
}

fn format_summary_text(summary: &RunSummary, verbose: bool) -> String {
    let mut output = String::new();

    if verbose {
        let _ = writeln!(output, "{:<28} {:<10} Fragments", "Chunk", "Chars");
        output.push_str(&"-".repeat(50));
        output.push('\n');
        for chunk in &summary.chunks {
            let name = chunk
                .path
                .file_name()
                .map_or_else(|| "-".to_string(), |n| n.to_string_lossy().to_string());
            let _ = writeln!(output, "{:<28} {:<10} {}", name, chunk.size, chunk.fragments);
        }
        let _ = writeln!(output, "Files included: {}", summary.files_included);
    }

    let _ = writeln!(
        output,
        "Finished generating {} chunk(s) in '{}'.",
        summary.chunk_count,
        summary.output_dir.display()
    );
    output
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                success: bool,
                error: String,
            }
            format_json(&ErrorOutput {
                success: false,
                error: error.to_string(),
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
