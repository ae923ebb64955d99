//! Helpers shared by the keymark commands

use std::fs;
use std::path::{Path, PathBuf};

use keymark_core::config::GraderConfig;
use keymark_core::error::{KeymarkError, Result};
use keymark_core::model::{join_options, OptionSet};

/// Read a document from disk; an unreadable file is a document error for `role`
pub fn read_document(path: &Path, role: &str) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| KeymarkError::document_open(role, format!("{}: {}", path.display(), e)))
}

/// Directory for default-named reports.
///
/// Precedence: explicit override, then `[report] directory`, then the
/// response sheet's own directory.
pub fn report_dir(config: &GraderConfig, sheet: &Path, override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Some(dir) = &config.report.directory {
        return PathBuf::from(dir);
    }
    match sheet.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Render an option set as `[1, 2]`
pub fn bracketed(options: &OptionSet) -> String {
    format!("[{}]", join_options(options))
}

/// Print a JSON value to stdout
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
