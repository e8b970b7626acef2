//! Command trait and context for dispatching commands

use std::time::Instant;

use crate::cli::Cli;
use germs_core::config::ScorerConfig;
use germs_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: ScorerConfig,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, config: ScorerConfig, start: Instant) -> Self {
        Self { cli, config, start }
    }

    /// Whether human-readable progress lines should be printed
    pub fn chatty(&self) -> bool {
        !self.cli.quiet
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("germs-eval {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Label aggregation, submission validation and scoring for GermEval.");
        println!();
        println!("Run `germs-eval --help` for usage information.");
        Ok(())
    }
}
