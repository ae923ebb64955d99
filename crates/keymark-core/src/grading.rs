//! End-to-end grading: document bytes in, scored summary out

use std::time::Instant;

use serde::Serialize;

use crate::answer_key::{extract_answer_key, AnswerKey, KeyScan};
use crate::config::GraderConfig;
use crate::error::Result;
use crate::model::ResponseMap;
use crate::pdf;
use crate::response::extract_responses;
use crate::score::{score, ScoreSummary};
use crate::trace_time;

/// Document role names used in error messages
pub const RESPONSE_SHEET: &str = "response sheet";
pub const ANSWER_KEY: &str = "answer key";

/// Everything produced by grading one response sheet
#[derive(Debug, Clone, Serialize)]
pub struct Grading {
    pub responses: ResponseMap,
    pub key: AnswerKey,
    pub summary: ScoreSummary,
}

impl Grading {
    pub fn final_score(&self) -> f64 {
        self.summary.final_score()
    }
}

/// Grades response sheets with a fixed configuration.
///
/// Holds no state between calls; one grader can score any number of sheets.
#[derive(Debug, Clone, Default)]
pub struct Grader {
    config: GraderConfig,
}

impl Grader {
    pub fn new(config: GraderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GraderConfig {
        &self.config
    }

    /// Extract chosen options from response sheet PDF bytes
    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    pub fn read_responses(&self, bytes: &[u8]) -> Result<ResponseMap> {
        let start = Instant::now();
        let text = pdf::load_text(bytes, RESPONSE_SHEET)?;
        let responses = extract_responses(&text);
        trace_time!(start, "read_responses", questions = responses.len());
        Ok(responses)
    }

    /// Extract highlighted options and ambiguity notes from answer key PDF bytes
    #[tracing::instrument(skip_all, fields(len = bytes.len()))]
    pub fn read_answer_key(&self, bytes: &[u8]) -> Result<AnswerKey> {
        let start = Instant::now();
        let document = pdf::load_document(bytes, ANSWER_KEY)?;
        let key = extract_answer_key(document.lines(), &self.key_scan());
        trace_time!(start, "read_answer_key", questions = key.answers.len());
        Ok(key)
    }

    /// Score already-extracted responses against an extracted key
    pub fn grade(&self, responses: ResponseMap, key: AnswerKey) -> Grading {
        let summary = score(&responses, &key);
        Grading {
            responses,
            key,
            summary,
        }
    }

    /// Grade one response sheet against one answer key, both as PDF bytes
    pub fn grade_documents(&self, response_pdf: &[u8], key_pdf: &[u8]) -> Result<Grading> {
        let responses = self.read_responses(response_pdf)?;
        let key = self.read_answer_key(key_pdf)?;
        Ok(self.grade(responses, key))
    }

    fn key_scan(&self) -> KeyScan<'_> {
        KeyScan {
            highlight: &self.config.highlight,
            config: &self.config.answer_key,
        }
    }
}
