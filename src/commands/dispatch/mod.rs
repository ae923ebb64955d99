//! Command dispatch logic for keymark

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use keymark_core::config::GraderConfig;
use keymark_core::error::Result;
use keymark_core::grading::Grader;
use tracing::debug;

mod command;
mod commands;

use command::{Command, CommandContext, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = GraderConfig::discover(cli.config.as_deref(), &cwd)?;

    debug!(elapsed = ?start.elapsed(), "load_config");

    let grader = Grader::new(config);
    let ctx = CommandContext::new(cli, &grader, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
