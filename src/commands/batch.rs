//! `keymark batch` command - grade many response sheets against one key
//!
//! The key is read once. Directories are walked for `*.pdf` files. A sheet
//! that fails is reported and skipped; the command fails at the end if any
//! sheet did.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::cli::{BatchArgs, Cli, OutputFormat};
use crate::commands::helpers::{print_json, read_document, report_dir};
use keymark_core::answer_key::AnswerKey;
use keymark_core::bail_usage;
use keymark_core::error::{KeymarkError, Result};
use keymark_core::grading::{Grader, ANSWER_KEY};
use keymark_core::report;

/// Result of grading one sheet in a batch
#[derive(Debug, Serialize)]
struct SheetResult {
    path: String,
    correct: usize,
    wrong: usize,
    final_score: f64,
    report: String,
}

/// Execute the batch command
pub fn execute(cli: &Cli, grader: &Grader, args: &BatchArgs) -> Result<()> {
    if cli.format == OutputFormat::Csv {
        bail_usage!("--format csv is not available for batch; each sheet gets its own CSV report");
    }

    let sheets = collect_sheets(&args.paths, &args.key);
    if sheets.is_empty() {
        bail_usage!("no response sheet PDFs found");
    }
    debug!(sheets = sheets.len(), "collected response sheets");

    let key = grader.read_answer_key(&read_document(&args.key, ANSWER_KEY)?)?;
    let at = Local::now();

    let mut graded = Vec::new();
    let mut failed = Vec::new();
    for sheet in &sheets {
        match grade_sheet(grader, &key, sheet, args.out_dir.as_deref(), at) {
            Ok(result) => graded.push(result),
            Err(e) => {
                warn!(sheet = %sheet.display(), error = %e, "failed to grade sheet");
                failed.push((sheet.display().to_string(), e));
            }
        }
    }

    match cli.format {
        OutputFormat::Json => print_json(&json!({
            "key": args.key.display().to_string(),
            "graded": graded,
            "failed": failed
                .iter()
                .map(|(path, e)| json!({ "path": path, "error": e.to_json()["error"] }))
                .collect::<Vec<_>>(),
        }))?,
        _ => {
            for result in &graded {
                println!(
                    "{}: correct {}, wrong {}, final score {:?} -> {}",
                    result.path, result.correct, result.wrong, result.final_score, result.report
                );
            }
            for (path, e) in &failed {
                println!("{}: error: {}", path, e);
            }
            if !cli.quiet {
                println!();
                println!("Graded {} of {} sheets", graded.len(), sheets.len());
            }
        }
    }

    if !failed.is_empty() {
        return Err(KeymarkError::Other(format!(
            "{} of {} response sheets failed",
            failed.len(),
            sheets.len()
        )));
    }
    Ok(())
}

fn grade_sheet(
    grader: &Grader,
    key: &AnswerKey,
    sheet: &Path,
    out_dir: Option<&Path>,
    at: DateTime<Local>,
) -> Result<SheetResult> {
    let bytes = read_document(sheet, keymark_core::grading::RESPONSE_SHEET)?;
    let responses = grader.read_responses(&bytes)?;
    let grading = grader.grade(responses, key.clone());

    let path = report_dir(grader.config(), sheet, out_dir).join(report_name(sheet, at));
    let saved = report::save(&grading.summary, &path)?;

    Ok(SheetResult {
        path: sheet.display().to_string(),
        correct: grading.summary.correct,
        wrong: grading.summary.wrong,
        final_score: grading.final_score(),
        report: saved.display().to_string(),
    })
}

/// Per-sheet report name: sheets graded in the same second stay distinct
fn report_name(sheet: &Path, at: DateTime<Local>) -> String {
    let stem = sheet
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sheet".to_string());
    format!("{}_{}", stem, report::default_file_name(at))
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Expand the given paths into response sheet files, skipping the key itself
fn collect_sheets(paths: &[PathBuf], key: &Path) -> Vec<PathBuf> {
    let mut sheets = Vec::new();
    for path in paths {
        if path.is_dir() {
            sheets.extend(
                WalkDir::new(path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().is_file() && is_pdf(entry.path()))
                    .map(|entry| entry.into_path()),
            );
        } else {
            sheets.push(path.clone());
        }
    }

    // A sheet named directly and also found under a directory is graded once
    let key = canonical(key);
    let mut seen = BTreeSet::new();
    sheets.retain(|sheet| {
        let id = canonical(sheet);
        id != key && seen.insert(id)
    });
    sheets
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
