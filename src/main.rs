//! germs-eval - GermEval label aggregation and submission scoring CLI
//!
//! Turns raw annotations into subtask files and gold targets, and
//! validates and scores competition submissions against them.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use germs_core::error::{ExitCode as GermsExitCode, GermsError};
use germs_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if wants_json(env::args().skip(1)) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let error = usage_error(&err);
            eprintln!("{}", error.to_json());
            return exit_with(error.exit_code());
        }
        Err(err) => err.exit(),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => exit_with(GermsExitCode::Success),
        Err(e) => {
            report(&cli, &e);
            exit_with(e.exit_code())
        }
    }
}

fn exit_with(code: GermsExitCode) -> ExitCode {
    ExitCode::from(code as u8)
}

/// Map a clap parse failure onto the error envelope
fn usage_error(err: &clap::Error) -> GermsError {
    match err.kind() {
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::ArgumentConflict => GermsError::UsageError(err.to_string()),
        _ => GermsError::Other(err.to_string()),
    }
}

fn report(cli: &Cli, error: &GermsError) {
    if cli.format == OutputFormat::Json {
        eprintln!("{}", error.to_json());
        return;
    }
    if cli.quiet {
        return;
    }
    eprintln!("error: {}", error);
    if let GermsError::ValidationFailed { violations } = error {
        for violation in violations {
            eprintln!("  - {}", violation);
        }
    }
}

/// Whether the raw arguments ask for JSON output. Used when clap rejects
/// the command line before `--format` is available.
fn wants_json(args: impl Iterator<Item = String>) -> bool {
    let args: Vec<String> = args.collect();
    args.iter().any(|arg| arg == "--format=json")
        || args
            .windows(2)
            .any(|pair| pair[0] == "--format" && pair[1] == "json")
}
