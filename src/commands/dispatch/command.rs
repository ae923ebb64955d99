//! Command trait and context for dispatching commands

use std::time::Instant;

use crate::cli::Cli;
use keymark_core::error::Result;
use keymark_core::grading::Grader;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub grader: &'a Grader,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, grader: &'a Grader, start: Instant) -> Self {
        Self { cli, grader, start }
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
        println!("keymark {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Grades response sheets against color-annotated answer keys.");
        println!();
        println!("Run `keymark --help` for usage information.");
        Ok(())
    }
}
