//! Grader configuration for keymark
//!
//! Configuration lives in `keymark.toml`. Every field is optional and falls
//! back to the built-in defaults, so an empty file is a valid config.

pub mod types;

use std::fs;
use std::path::Path;

use crate::bail_invalid;
use crate::error::{KeymarkError, Result};

pub use types::{GraderConfig, KeyScanConfig, ReportConfig, CONFIG_FILE_NAME};

impl GraderConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| KeymarkError::io_operation("read config", path.display(), e))?;
        let config: GraderConfig =
            toml::from_str(&content).map_err(|e| KeymarkError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load an explicit config file, or `keymark.toml` under `dir` when it
    /// exists, or the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            return Self::load(&candidate);
        }

        Ok(Self::default())
    }

    /// Reject values that can never classify anything sensibly
    pub fn validate(&self) -> Result<()> {
        if self.highlight.margin < 0 {
            bail_invalid!("highlight margin", self.highlight.margin);
        }
        if self
            .answer_key
            .ambiguity_markers
            .iter()
            .any(|m| m.trim().is_empty())
        {
            bail_invalid!("ambiguity marker", "\"\"");
        }
        Ok(())
    }
}
