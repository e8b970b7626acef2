//! Subcommand argument structures

use clap::Args;
use std::path::PathBuf;

use super::parse::parse_subtask;
use germs_core::schema::Subtask;

#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Subtask (1: categorical decisions, 2: distributions)
    #[arg(long, short, value_parser = parse_subtask)]
    pub subtask: Subtask,

    /// Annotated records (JSON lines)
    #[arg(long, short)]
    pub input: PathBuf,

    /// Tab-separated output file
    #[arg(long, short)]
    pub output: PathBuf,

    /// Drop items without annotations instead of failing
    #[arg(long)]
    pub skip_empty: bool,
}

#[derive(Args, Debug)]
pub struct TargetsArgs {
    /// Annotated records (JSON lines)
    #[arg(long, short)]
    pub input: PathBuf,

    /// Gold targets output file (JSON)
    #[arg(long, short)]
    pub output: PathBuf,

    /// Drop items without annotations instead of failing
    #[arg(long)]
    pub skip_empty: bool,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Gold labels (JSON array of {id, labels})
    #[arg(long, short)]
    pub labels: PathBuf,

    /// Test items (JSON lines of {id, text, annotators})
    #[arg(long, short)]
    pub texts: PathBuf,

    /// Annotated records output file (JSON lines)
    #[arg(long, short)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Subtask (1: categorical decisions, 2: distributions)
    #[arg(long, short, value_parser = parse_subtask)]
    pub subtask: Subtask,

    /// Submission file, or a directory holding exactly one
    #[arg(long)]
    pub submission: PathBuf,

    /// Gold targets (JSON)
    #[arg(long, short)]
    pub targets: PathBuf,

    /// Report every violation instead of stopping at the first
    #[arg(long)]
    pub all_errors: bool,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Subtask (1: categorical decisions, 2: distributions)
    #[arg(long, short, value_parser = parse_subtask)]
    pub subtask: Subtask,

    /// Submission file, or a directory holding exactly one
    #[arg(long)]
    pub submission: PathBuf,

    /// Gold targets (JSON)
    #[arg(long, short)]
    pub targets: PathBuf,

    /// Report file, or a directory to write the report into
    #[arg(long, short)]
    pub output: PathBuf,

    /// Report every violation instead of stopping at the first
    #[arg(long)]
    pub all_errors: bool,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Predicted annotations (JSON lines)
    #[arg(long, short)]
    pub predictions: PathBuf,

    /// Gold annotations (JSON lines), e.g. the output of `merge`
    #[arg(long, short)]
    pub gold: PathBuf,

    /// Also write the report to this file (JSON)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct LabelsArgs {
    /// Annotated record files (JSON lines)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}
