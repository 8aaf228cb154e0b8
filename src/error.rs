//! Error types for quote loading, editing and validation.
//!
//! The calculation engine itself never fails; these errors only arise at the
//! file boundary and from edits that reference lines or variations that do
//! not exist.

use std::path::PathBuf;
use thiserror::Error;

/// Error codes for quote processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// File not found (-1)
    FileNotFound = -1,
    /// Empty file (-2)
    EmptyFile = -2,
    /// Malformed JSON document (-3)
    ParseError = -3,
    /// Referenced variation or line item does not exist (E100)
    NotFound = 100,
    /// Quote failed pre-save validation (E200)
    ValidationFailed = 200,
}

/// Main error type for the quote calculator.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Variation not found: {id}")]
    VariationNotFound { id: String },

    #[error("No {kind} line at index {index} (quote has {len})")]
    LineNotFound {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Validation failed: {}", .errors.join("; "))]
    Validation { errors: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

impl QuoteError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            QuoteError::FileNotFound { .. } => ErrorCode::FileNotFound,
            QuoteError::EmptyFile { .. } => ErrorCode::EmptyFile,
            QuoteError::Json(_) => ErrorCode::ParseError,
            QuoteError::VariationNotFound { .. } => ErrorCode::NotFound,
            QuoteError::LineNotFound { .. } => ErrorCode::NotFound,
            QuoteError::Validation { .. } => ErrorCode::ValidationFailed,
            QuoteError::Io(_) => ErrorCode::FileNotFound,
            QuoteError::Fmt(_) => ErrorCode::ParseError,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

/// Result type alias for quote operations.
pub type Result<T> = std::result::Result<T, QuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = QuoteError::FileNotFound {
            path: PathBuf::from("missing.json"),
        };
        assert_eq!(err.code(), ErrorCode::FileNotFound);
        assert_eq!(err.code_value(), -1);

        let err = QuoteError::VariationNotFound {
            id: "var-9".to_string(),
        };
        assert_eq!(err.code_value(), 100);
    }

    #[test]
    fn test_validation_message_joins_errors() {
        let err = QuoteError::Validation {
            errors: vec!["No client selected".into(), "No metal type".into()],
        };
        assert_eq!(
            err.to_string(),
            "Validation failed: No client selected; No metal type"
        );
    }

    #[test]
    fn test_line_not_found_message() {
        let err = QuoteError::LineNotFound {
            kind: "stone",
            index: 3,
            len: 1,
        };
        assert_eq!(err.to_string(), "No stone line at index 3 (quote has 1)");
    }
}
