//! CLI argument parsing for germs-eval
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json,
//! --config

pub mod args;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{
    AggregateArgs, EvaluateArgs, LabelsArgs, MergeArgs, ScoreArgs, TargetsArgs, ValidateArgs,
};
pub use germs_core::format::OutputFormat;
use parse::parse_format;

/// GermEval label aggregation, submission validation and scoring
#[derive(Parser, Debug)]
#[command(name = "germs-eval")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (error, warn, info, debug, trace, or a full directive)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Scorer configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reduce annotated records to a subtask file
    Aggregate(AggregateArgs),

    /// Derive gold targets for both subtasks from annotated records
    Targets(TargetsArgs),

    /// Attach gold labels to test items
    Merge(MergeArgs),

    /// Check a submission without scoring it
    Validate(ValidateArgs),

    /// Validate and score a submission, writing a JSON report
    Score(ScoreArgs),

    /// Compare predicted annotations with gold annotations per annotator
    Evaluate(EvaluateArgs),

    /// Count labels in annotated record files
    Labels(LabelsArgs),
}
