//! `keymark responses` command - show chosen options from a response sheet

use std::io;

use serde_json::json;

use crate::cli::{Cli, OutputFormat, ResponsesArgs};
use crate::commands::helpers::{bracketed, print_json, read_document};
use keymark_core::error::Result;
use keymark_core::grading::{Grader, RESPONSE_SHEET};
use keymark_core::report;

/// Execute the responses command
pub fn execute(cli: &Cli, grader: &Grader, args: &ResponsesArgs) -> Result<()> {
    let bytes = read_document(&args.response, RESPONSE_SHEET)?;
    let responses = grader.read_responses(&bytes)?;

    match cli.format {
        OutputFormat::Human => {
            if responses.is_empty() {
                if !cli.quiet {
                    println!("No responses found");
                }
                return Ok(());
            }
            for (id, chosen) in responses.iter() {
                println!("QID: {} | Chosen: {}", id, bracketed(chosen));
            }
        }
        OutputFormat::Json => print_json(&json!({
            "count": responses.len(),
            "responses": responses,
        }))?,
        OutputFormat::Csv => report::write_options_csv(&responses, None, io::stdout().lock())?,
    }

    Ok(())
}
