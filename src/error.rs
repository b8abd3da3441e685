//! Error types for the Likemindr match engine
//!
//! This module provides the engine's error hierarchy:
//! - `thiserror` for ergonomic error definitions
//! - Domain-specific validation variants for actionable error handling
//! - Proper error context and source chaining
//!
//! Validation errors are the only errors the scoring pipeline itself raises;
//! they are local-and-immediate and surfaced to the caller rather than
//! silently coerced into a score.

use std::borrow::Cow;
use thiserror::Error;

/// Result type alias for Likemindr engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Likemindr match engine
#[derive(Debug, Error)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Configuration error: {message}")]
    Config {
        message: Cow<'static, str>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing required environment variable: {var}")]
    MissingEnvVar { var: &'static str },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig {
        key: &'static str,
        message: Cow<'static, str>,
    },

    // ========================================================================
    // Validation Errors (the engine's own taxonomy)
    // ========================================================================
    #[error("Book mismatch: subject is reading '{subject_book}', candidate record is for '{candidate_book}'")]
    BookMismatch {
        subject_book: String,
        candidate_book: String,
    },

    #[error("Reading record for reader {reader_id} has no current page; cannot score progress")]
    MissingCurrentPage { reader_id: String },

    #[error("Invalid match request: {message}")]
    InvalidRequest { message: Cow<'static, str> },

    // ========================================================================
    // Pipeline Errors
    // ========================================================================
    #[error("Match computation cancelled before completion")]
    Cancelled,

    #[error("Scoring task failed: {message}")]
    ScoringTask { message: Cow<'static, str> },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    // ========================================================================
    // Constructors for common error patterns
    // ========================================================================

    /// Create a configuration error
    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a book-mismatch validation error
    pub fn book_mismatch(
        subject_book: impl Into<String>,
        candidate_book: impl Into<String>,
    ) -> Self {
        Self::BookMismatch {
            subject_book: subject_book.into(),
            candidate_book: candidate_book.into(),
        }
    }

    /// Create a missing-page validation error
    pub fn missing_current_page(reader_id: impl std::fmt::Display) -> Self {
        Self::MissingCurrentPage {
            reader_id: reader_id.to_string(),
        }
    }

    /// Create an invalid-request validation error
    pub fn invalid_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    // ========================================================================
    // Error Classification
    // ========================================================================

    /// Returns true if this error was caused by malformed or inconsistent input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::BookMismatch { .. }
                | Error::MissingCurrentPage { .. }
                | Error::InvalidRequest { .. }
        )
    }

    /// Get error code for the calling layer's responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } | Error::MissingEnvVar { .. } | Error::InvalidConfig { .. } => {
                "CONFIG_ERROR"
            }
            Error::BookMismatch { .. }
            | Error::MissingCurrentPage { .. }
            | Error::InvalidRequest { .. } => "VALIDATION_ERROR",
            Error::Cancelled => "CANCELLED",
            Error::ScoringTask { .. } => "SCORING_ERROR",
            Error::Json(_) => "SERIALIZATION_ERROR",
            Error::Other(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<std::env::VarError> for Error {
    fn from(_err: std::env::VarError) -> Self {
        Error::Config {
            message: "Environment variable error".into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(Error::book_mismatch("book-a", "book-b").is_validation());
        assert!(Error::missing_current_page("reader-1").is_validation());
        assert!(!Error::Cancelled.is_validation());
        assert!(!Error::config("bad").is_validation());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::book_mismatch("a", "b").error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(Error::Cancelled.error_code(), "CANCELLED");
        assert_eq!(
            Error::MissingEnvVar { var: "MATCH_LIMIT" }.error_code(),
            "CONFIG_ERROR"
        );
    }

    #[test]
    fn test_book_mismatch_message() {
        let err = Error::book_mismatch("vol-123", "vol-456");
        let msg = err.to_string();
        assert!(msg.contains("vol-123"));
        assert!(msg.contains("vol-456"));
    }
}
