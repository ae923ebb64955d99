//! Response sheet extraction
//!
//! Recovers `question id → chosen options` from the joined text of a
//! response sheet. Labels match case-insensitively; the chosen-option field
//! may use any mix of commas, pipes and whitespace between option numbers.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::model::{OptionSet, QuestionId, ResponseMap};

static ANSWER_RE: OnceLock<Option<Regex>> = OnceLock::new();
static DIGITS_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(error = %e, pattern, "Failed to compile response pattern");
            None
        }
    }
}

fn answer_re() -> Option<&'static Regex> {
    ANSWER_RE
        .get_or_init(|| {
            compile(r"(?i)Question\s*ID\s*:\s*(\d+)[\s\S]*?Chosen\s*Option\s*:\s*([0-9,|\s]+)")
        })
        .as_ref()
}

fn digits_re() -> Option<&'static Regex> {
    DIGITS_RE.get_or_init(|| compile(r"\d+")).as_ref()
}

/// Parse the option numbers out of a chosen-option field such as `"1, 3"` or `"2 | 4"`
pub fn parse_option_list(field: &str) -> OptionSet {
    let Some(re) = digits_re() else {
        return OptionSet::new();
    };
    re.find_iter(field).map(|m| m.as_str().to_string()).collect()
}

/// Extract every answered question from response sheet text.
///
/// Each `Question ID : <n>` pairs with the next `Chosen Option : <list>`
/// after it. A repeated question id replaces the earlier entry. A field with
/// no option number leaves the question out. Text without any match yields
/// an empty map.
pub fn extract_responses(text: &str) -> ResponseMap {
    let mut responses = ResponseMap::new();
    let Some(re) = answer_re() else {
        return responses;
    };
    let mut matches = 0usize;

    for cap in re.captures_iter(text) {
        matches += 1;
        let id = QuestionId::new(&cap[1]);
        let options = parse_option_list(&cap[2]);
        // A field of bare separators ("Chosen Option : --") carries no answer
        if options.is_empty() {
            continue;
        }
        responses.insert(id, options);
    }

    debug!(matches, questions = responses.len(), "extracted responses");
    responses
}
