//! Binary entry point for codechunk.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::Parser;
use clap::error::ErrorKind;
use codechunk::cli::output::{OutputFormat, format_error};
use codechunk::cli::{Cli, execute};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            // Usage errors go to stdout with exit code 1.
            print!("{}", e.render());
            return ExitCode::FAILURE;
        }
    };

    init_logging(cli.verbose);
    let format = OutputFormat::parse(&cli.format);

    match execute(&cli) {
        Ok(output) => {
            // Handle broken pipe gracefully (e.g., when piped to `head`)
            if let Err(e) = write!(io::stdout(), "{output}")
                && e.kind() != io::ErrorKind::BrokenPipe
            {
                eprintln!("Error writing to stdout: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let error_output = format_error(&e, format);
            match format {
                OutputFormat::Json => println!("{error_output}"),
                OutputFormat::Text => eprintln!("Error: {error_output}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("codechunk=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("codechunk=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}
