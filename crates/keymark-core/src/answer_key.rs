//! Answer key extraction from styled lines
//!
//! The key lists each question as a `Question Id : <n>` line followed by its
//! numbered options. Correct options are the ones whose number is drawn in the
//! highlight color. Scanning is a fold over lines in reading order carrying
//! only the most recently seen question id.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::color::HighlightRule;
use crate::config::KeyScanConfig;
use crate::document::Line;
use crate::model::{AmbiguousSet, AnswerKeyMap, QuestionId};

static QUESTION_RE: OnceLock<Option<Regex>> = OnceLock::new();
static OPTION_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(error = %e, pattern, "Failed to compile answer key pattern");
            None
        }
    }
}

fn question_re() -> Option<&'static Regex> {
    QUESTION_RE
        .get_or_init(|| compile(r"(?i)Question\s+Id\s*:\s*(\d+)"))
        .as_ref()
}

fn option_re() -> Option<&'static Regex> {
    OPTION_RE.get_or_init(|| compile(r"^(\d+)\.\s*")).as_ref()
}

/// Correct options and any-correct flags recovered from an answer key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerKey {
    /// Highlighted options per question; an empty set means the question was
    /// seen but no option was detected in the highlight color
    pub answers: AnswerKeyMap,
    /// Questions whose key note grants full marks for any correct option
    pub ambiguous: AmbiguousSet,
}

impl AnswerKey {
    pub fn is_ambiguous(&self, id: &QuestionId) -> bool {
        self.ambiguous.contains(id)
    }
}

/// Everything the scan needs besides the lines themselves
#[derive(Debug, Clone, Copy)]
pub struct KeyScan<'a> {
    pub highlight: &'a HighlightRule,
    pub config: &'a KeyScanConfig,
}

#[derive(Debug, Default)]
struct ScanState {
    key: AnswerKey,
    current: Option<QuestionId>,
}

impl ScanState {
    fn step(mut self, line: &Line, scan: &KeyScan<'_>) -> Self {
        let text = line.text();
        let text = text.trim();

        if let Some(cap) = question_re().and_then(|re| re.captures(text)) {
            let id = QuestionId::new(&cap[1]);
            self.key.answers.entry_or_default(id.clone());
            self.current = Some(id);
        }

        let Some(current) = self.current.clone() else {
            return self;
        };

        let lower = text.to_lowercase();
        if scan
            .config
            .ambiguity_markers
            .iter()
            .any(|marker| lower.contains(&marker.to_lowercase()))
        {
            trace!(question = %current, "ambiguity note");
            self.key.ambiguous.insert(current.clone());
        }

        for span in &line.spans {
            let Some(cap) = option_re().and_then(|re| re.captures(span.text.trim())) else {
                continue;
            };
            if scan.highlight.matches(span.color.as_ref()) {
                trace!(question = %current, option = &cap[1], "highlighted option");
                self.key
                    .answers
                    .entry_or_default(current.clone())
                    .insert(cap[1].to_string());
            }
        }

        self
    }
}

/// Scan answer key lines (in reading order) for correct options and
/// any-correct notes.
///
/// Ambiguity notes and options attach to whichever question id was seen
/// last; lines before the first question marker are ignored.
pub fn extract_answer_key<'l, I>(lines: I, scan: &KeyScan<'_>) -> AnswerKey
where
    I: IntoIterator<Item = &'l Line>,
{
    let state = lines
        .into_iter()
        .fold(ScanState::default(), |state, line| state.step(line, scan));

    debug!(
        questions = state.key.answers.len(),
        ambiguous = state.key.ambiguous.len(),
        "extracted answer key"
    );
    state.key
}
