//! Error types and exit codes for keymark
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (unreadable document, invalid config)
//!
//! Parsing gaps inside a readable document are never errors: unmatched
//! markers are dropped from the extracted maps and surface only as
//! `no-key` or empty-key verdicts.

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the keymark CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unreadable document, invalid config (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while grading
#[derive(Error, Debug)]
pub enum KeymarkError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or csv)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("failed to open {document}: {reason}")]
    DocumentOpen { document: String, reason: String },

    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl KeymarkError {
    /// Create an error for a document that could not be parsed
    pub fn document_open(document: &str, error: impl std::fmt::Display) -> Self {
        KeymarkError::DocumentOpen {
            document: document.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        KeymarkError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        KeymarkError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            KeymarkError::UnknownFormat(_)
            | KeymarkError::UsageError(_)
            | KeymarkError::InvalidValue { .. } => ExitCode::Usage,

            KeymarkError::DocumentOpen { .. } | KeymarkError::InvalidConfig { .. } => {
                ExitCode::Data
            }

            KeymarkError::Io(_)
            | KeymarkError::Json(_)
            | KeymarkError::Csv(_)
            | KeymarkError::FailedOperationWithTarget { .. }
            | KeymarkError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            KeymarkError::UnknownFormat(_) => "unknown_format",
            KeymarkError::UsageError(_) => "usage_error",
            KeymarkError::InvalidValue { .. } => "invalid_value",
            KeymarkError::DocumentOpen { .. } => "document_open",
            KeymarkError::InvalidConfig { .. } => "invalid_config",
            KeymarkError::Io(_) => "io_error",
            KeymarkError::Json(_) => "json_error",
            KeymarkError::Csv(_) => "csv_error",
            KeymarkError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            KeymarkError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for keymark operations
pub type Result<T> = std::result::Result<T, KeymarkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_open_is_data_error() {
        let err = KeymarkError::document_open("answer key", "invalid file header");
        assert_eq!(err.exit_code(), ExitCode::Data);
        assert_eq!(
            err.to_string(),
            "failed to open answer key: invalid file header"
        );
    }

    #[test]
    fn test_usage_errors_map_to_usage_code() {
        assert_eq!(
            KeymarkError::UnknownFormat("xml".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            KeymarkError::invalid_value("margin", -3).exit_code(),
            ExitCode::Usage
        );
    }

    #[test]
    fn test_to_json_envelope() {
        let err = KeymarkError::document_open("response sheet", "not a PDF");
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "document_open");
        assert_eq!(
            json["error"]["message"],
            "failed to open response sheet: not a PDF"
        );
    }
}
