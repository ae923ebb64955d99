//! Reconciles chosen options against the answer key
//!
//! Policy per question:
//! - no key entry: `NoKey`, counted wrong
//! - exactly one correct option: the chosen set must equal it
//! - zero or several correct options on an any-correct question: any overlap
//! - zero or several correct options otherwise: the chosen set must equal the key
//!
//! Only questions present in the responses are scored; unanswered questions
//! produce no verdict and count neither way.

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::answer_key::AnswerKey;
use crate::model::{OptionSet, QuestionId, ResponseMap};

/// Classification of one scored question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    NoKey,
    Correct,
    Wrong,
    CorrectAmbiguous,
    WrongAmbiguous,
    CorrectMultiExact,
    WrongMulti,
}

impl Outcome {
    pub fn is_correct(self) -> bool {
        matches!(
            self,
            Outcome::Correct | Outcome::CorrectAmbiguous | Outcome::CorrectMultiExact
        )
    }

    /// Label used in reports and terminal output
    pub fn label(self) -> &'static str {
        match self {
            Outcome::NoKey => "no-key",
            Outcome::Correct => "correct",
            Outcome::Wrong => "wrong",
            Outcome::CorrectAmbiguous => "correct (ambiguous)",
            Outcome::WrongAmbiguous => "wrong (ambiguous)",
            Outcome::CorrectMultiExact => "correct (multi exact)",
            Outcome::WrongMulti => "wrong (multi)",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Per-question verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub question: QuestionId,
    pub chosen: OptionSet,
    pub correct: OptionSet,
    pub outcome: Outcome,
}

/// Counts and verdicts for one response sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub correct: usize,
    pub wrong: usize,
    pub verdicts: Vec<Verdict>,
}

impl ScoreSummary {
    /// Half a mark per correct answer: `correct / 2`
    pub fn final_score(&self) -> f64 {
        self.correct as f64 / 2.0
    }

    pub fn attempted(&self) -> usize {
        self.verdicts.len()
    }
}

/// Decide the outcome for one question.
///
/// `key` is `None` when the question is missing from the answer key.
pub fn judge(chosen: &OptionSet, key: Option<&OptionSet>, ambiguous: bool) -> Outcome {
    let Some(key) = key else {
        return Outcome::NoKey;
    };

    if key.len() == 1 {
        return if chosen == key {
            Outcome::Correct
        } else {
            Outcome::Wrong
        };
    }

    if ambiguous {
        if chosen.intersection(key).next().is_some() {
            Outcome::CorrectAmbiguous
        } else {
            Outcome::WrongAmbiguous
        }
    } else if chosen == key {
        Outcome::CorrectMultiExact
    } else {
        Outcome::WrongMulti
    }
}

/// Score every answered question against the key, in response order
pub fn score(responses: &ResponseMap, key: &AnswerKey) -> ScoreSummary {
    let mut summary = ScoreSummary::default();

    for (question, chosen) in responses.iter() {
        let expected = key.answers.get(question);
        let outcome = judge(chosen, expected, key.is_ambiguous(question));
        trace!(question = %question, outcome = outcome.label(), "verdict");

        if outcome.is_correct() {
            summary.correct += 1;
        } else {
            summary.wrong += 1;
        }

        summary.verdicts.push(Verdict {
            question: question.clone(),
            chosen: chosen.clone(),
            correct: expected.cloned().unwrap_or_default(),
            outcome,
        });
    }

    debug!(
        correct = summary.correct,
        wrong = summary.wrong,
        "scored responses"
    );
    summary
}
