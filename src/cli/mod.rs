//! CLI argument parsing for keymark
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json, --config

pub mod args;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{BatchArgs, GradeArgs, KeyArgs, ResponsesArgs};
pub use output::OutputFormat;

/// Keymark - grade response sheets against color-annotated answer keys
#[derive(Parser, Debug)]
#[command(name = "keymark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human, json, csv)
    #[arg(long, global = true, default_value = "human", value_parser = output::parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging and phase timing
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (overrides --verbose)
    #[arg(long, global = true, env = "KEYMARK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit log events as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Grader config file (defaults to ./keymark.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grade a response sheet against an answer key
    Grade(GradeArgs),

    /// Show the options chosen on a response sheet
    Responses(ResponsesArgs),

    /// Show the correct options and any-correct questions of an answer key
    Key(KeyArgs),

    /// Grade many response sheets against one answer key
    Batch(BatchArgs),
}
