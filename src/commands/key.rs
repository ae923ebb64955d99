//! `keymark key` command - show the correct options of an answer key

use std::io;

use serde_json::json;

use crate::cli::{Cli, KeyArgs, OutputFormat};
use crate::commands::helpers::{bracketed, print_json, read_document};
use keymark_core::error::Result;
use keymark_core::grading::{Grader, ANSWER_KEY};
use keymark_core::report;

/// Execute the key command
pub fn execute(cli: &Cli, grader: &Grader, args: &KeyArgs) -> Result<()> {
    let bytes = read_document(&args.key, ANSWER_KEY)?;
    let key = grader.read_answer_key(&bytes)?;

    match cli.format {
        OutputFormat::Human => {
            if key.answers.is_empty() {
                if !cli.quiet {
                    println!("No questions found");
                }
                return Ok(());
            }
            for (id, correct) in key.answers.iter() {
                let note = if key.is_ambiguous(id) {
                    " | any correct"
                } else {
                    ""
                };
                println!("QID: {} | Correct: {}{}", id, bracketed(correct), note);
            }
        }
        OutputFormat::Json => print_json(&json!({
            "count": key.answers.len(),
            "answers": key.answers,
            "ambiguous": key.ambiguous,
        }))?,
        OutputFormat::Csv => {
            report::write_options_csv(&key.answers, Some(&key.ambiguous), io::stdout().lock())?
        }
    }

    Ok(())
}
