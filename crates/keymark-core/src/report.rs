//! Tabular grading report
//!
//! Layout (one row per line):
//!
//! ```text
//! Question ID,Chosen Options,Correct Options,Result
//! <id>,"<sorted chosen>","<sorted correct>",<result label>
//! ...
//! <blank>
//! Summary
//! Correct Answers,<n>
//! Wrong Answers,<n>
//! Final Score (Correct/2),<score>
//! ```

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::{KeymarkError, Result};
use crate::model::{join_options, AmbiguousSet, QuestionMap};
use crate::score::ScoreSummary;

pub const HEADERS: [&str; 4] = ["Question ID", "Chosen Options", "Correct Options", "Result"];

/// One report cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Count(usize),
    Score(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Count(n) => write!(f, "{}", n),
            Cell::Score(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// Build the report rows for a scored sheet
pub fn rows(summary: &ScoreSummary) -> Vec<Vec<Cell>> {
    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(summary.verdicts.len() + 6);
    rows.push(HEADERS.iter().map(|h| Cell::from(*h)).collect());

    for verdict in &summary.verdicts {
        rows.push(vec![
            Cell::from(verdict.question.to_string()),
            Cell::from(join_options(&verdict.chosen)),
            Cell::from(join_options(&verdict.correct)),
            Cell::from(verdict.outcome.label()),
        ]);
    }

    rows.push(Vec::new());
    rows.push(vec![Cell::from("Summary")]);
    rows.push(vec![
        Cell::from("Correct Answers"),
        Cell::Count(summary.correct),
    ]);
    rows.push(vec![Cell::from("Wrong Answers"), Cell::Count(summary.wrong)]);
    rows.push(vec![
        Cell::from("Final Score (Correct/2)"),
        Cell::Score(summary.final_score()),
    ]);
    rows
}

/// Write the report as CSV to any writer
pub fn write_csv<W: Write>(summary: &ScoreSummary, mut writer: W) -> Result<()> {
    // Blank rows go straight to the writer: csv would quote a lone empty field
    for (index, section) in rows(summary).split(|row| row.is_empty()).enumerate() {
        if index > 0 {
            writer.write_all(b"\n")?;
        }
        let mut csv = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut writer);
        for row in section {
            csv.write_record(row.iter().map(|c| c.to_string()))?;
        }
        csv.flush()?;
    }
    Ok(())
}

/// Write extracted per-question options as CSV.
///
/// With `ambiguous`, a third column flags any-correct questions.
pub fn write_options_csv<W: Write>(
    map: &QuestionMap,
    ambiguous: Option<&AmbiguousSet>,
    writer: W,
) -> Result<()> {
    let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    let mut header = vec!["Question ID", "Options"];
    if ambiguous.is_some() {
        header.push("Ambiguous");
    }
    csv.write_record(&header)?;

    for (id, options) in map.iter() {
        let mut record = vec![id.to_string(), join_options(options)];
        if let Some(flagged) = ambiguous {
            record.push(flagged.contains(id).to_string());
        }
        csv.write_record(&record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Default report file name for a run started at `at`
pub fn default_file_name(at: DateTime<Local>) -> String {
    format!("results_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Write the CSV report to `path`, creating parent directories as needed
pub fn save(summary: &ScoreSummary, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| KeymarkError::io_operation("create directory", parent.display(), e))?;
    }

    let file = fs::File::create(path)
        .map_err(|e| KeymarkError::io_operation("create report", path.display(), e))?;
    write_csv(summary, file)?;

    info!(path = %path.display(), "report saved");
    Ok(path.to_path_buf())
}
