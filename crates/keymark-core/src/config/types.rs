//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::color::HighlightRule;

/// Default file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "keymark.toml";

/// Grader configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraderConfig {
    /// Thresholds deciding which option glyph colors mark a correct answer
    #[serde(default)]
    pub highlight: HighlightRule,

    /// Answer key scanning options
    #[serde(default)]
    pub answer_key: KeyScanConfig,

    /// Report output options
    #[serde(default)]
    pub report: ReportConfig,
}

/// Options for scanning the answer key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyScanConfig {
    /// Lowercase substrings that flag the current question as any-correct
    #[serde(default = "default_ambiguity_markers")]
    pub ambiguity_markers: Vec<String>,
}

/// Report output options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory for default-named reports (defaults to the response sheet's directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl Default for KeyScanConfig {
    fn default() -> Self {
        Self {
            ambiguity_markers: default_ambiguity_markers(),
        }
    }
}

fn default_ambiguity_markers() -> Vec<String> {
    vec![
        "ambigu".to_string(),
        "candidate will get full marks".to_string(),
    ]
}
