//! `keymark grade` command - score one response sheet
//!
//! Prints the summary (correct, wrong, final score), the any-correct
//! questions and every verdict, and writes the CSV report unless
//! `--no-report` is given.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::json;

use crate::cli::{Cli, GradeArgs, OutputFormat};
use crate::commands::helpers::{bracketed, print_json, read_document, report_dir};
use keymark_core::error::Result;
use keymark_core::grading::{Grader, Grading, ANSWER_KEY, RESPONSE_SHEET};
use keymark_core::report;

/// Execute the grade command
pub fn execute(cli: &Cli, grader: &Grader, args: &GradeArgs) -> Result<()> {
    let response = read_document(&args.response, RESPONSE_SHEET)?;
    let key = read_document(&args.key, ANSWER_KEY)?;
    let grading = grader.grade_documents(&response, &key)?;

    let report_path = if args.no_report {
        None
    } else {
        let path = match &args.output {
            Some(path) => path.clone(),
            None => default_report_path(grader, &args.response),
        };
        Some(report::save(&grading.summary, &path)?)
    };

    match cli.format {
        OutputFormat::Human => print_human(cli, &grading, report_path.as_deref()),
        OutputFormat::Json => print_json(&grading_json(&grading, report_path.as_deref()))?,
        OutputFormat::Csv => report::write_csv(&grading.summary, io::stdout().lock())?,
    }

    Ok(())
}

fn default_report_path(grader: &Grader, sheet: &Path) -> PathBuf {
    report_dir(grader.config(), sheet, None).join(report::default_file_name(Local::now()))
}

/// JSON form of a grading run
pub fn grading_json(grading: &Grading, report: Option<&Path>) -> serde_json::Value {
    json!({
        "attempted": grading.summary.attempted(),
        "correct": grading.summary.correct,
        "wrong": grading.summary.wrong,
        "final_score": grading.final_score(),
        "ambiguous": grading.key.ambiguous,
        "verdicts": grading.summary.verdicts,
        "report": report.map(|p| p.display().to_string()),
    })
}

fn print_human(cli: &Cli, grading: &Grading, report: Option<&Path>) {
    let summary = &grading.summary;
    println!("Questions attempted: {}", summary.attempted());
    println!("Correct answers: {}", summary.correct);
    println!("Wrong answers: {}", summary.wrong);
    println!("Final Score (Correct/2): {:?}", summary.final_score());

    if cli.quiet {
        return;
    }

    if !grading.key.ambiguous.is_empty() {
        let ids: Vec<String> = grading.key.ambiguous.iter().map(|id| id.to_string()).collect();
        println!(
            "Any-correct questions (full marks for any correct option): {}",
            ids.join(", ")
        );
    }
    if let Some(path) = report {
        println!("Results saved to: {}", path.display());
    }

    if !summary.verdicts.is_empty() {
        println!();
    }
    for verdict in &summary.verdicts {
        println!(
            "QID: {} | Chosen: {} | Correct: {} | Result: {}",
            verdict.question,
            bracketed(&verdict.chosen),
            bracketed(&verdict.correct),
            verdict.outcome
        );
    }
}
