//! CLI command implementation.

use crate::cli::output::{OutputFormat, format_summary};
use crate::cli::parser::Cli;
use crate::error::Result;
use crate::pipeline::run;

/// Executes the CLI command.
///
/// Resolves the configuration, runs the pipeline, and returns the
/// formatted summary to print.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the run fails.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let config = cli.resolve_config()?;

    tracing::debug!(
        root = %cli.root.display(),
        output_dir = %cli.output_dir.display(),
        budget = config.budget,
        separate_sections = config.separate_sections,
        "starting run"
    );

    let summary = run(&cli.root, &cli.output_dir, &config)?;
    Ok(format_summary(&summary, cli.verbose, format))
}
