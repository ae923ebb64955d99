//! Command implementations for all keymark commands

use tracing::debug;

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{batch, grade, key, responses};
use keymark_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let result = match self {
            Commands::Grade(args) => grade::execute(ctx.cli, ctx.grader, args),
            Commands::Responses(args) => responses::execute(ctx.cli, ctx.grader, args),
            Commands::Key(args) => key::execute(ctx.cli, ctx.grader, args),
            Commands::Batch(args) => batch::execute(ctx.cli, ctx.grader, args),
        };
        debug!(elapsed = ?ctx.start.elapsed(), "execute_command");
        result
    }
}
