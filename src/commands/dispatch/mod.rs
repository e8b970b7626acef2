//! Command dispatch logic for germs-eval

use std::time::Instant;

use crate::cli::{Cli, Commands};
use crate::commands;
use germs_core::config::ScorerConfig;
use germs_core::error::Result;
use tracing::debug;

mod command;

pub use command::{Command, CommandContext, NoCommand};

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Aggregate(args) => commands::aggregate::execute(ctx, args),
            Commands::Targets(args) => commands::targets::execute(ctx, args),
            Commands::Merge(args) => commands::merge::execute(ctx, args),
            Commands::Validate(args) => commands::validate::execute(ctx, args),
            Commands::Score(args) => commands::score::execute(ctx, args),
            Commands::Evaluate(args) => commands::evaluate::execute(ctx, args),
            Commands::Labels(args) => commands::labels::execute(ctx, args),
        }
    }
}

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = ScorerConfig::resolve(cli.config.as_deref())?;

    debug!(elapsed = ?start.elapsed(), ?config, "resolve_config");

    let ctx = CommandContext::new(cli, config, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
