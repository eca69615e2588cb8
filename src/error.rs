//! Custom error types for tally
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for tally operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors (budget and preset documents)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// An amount that is not a number, or is negative where that is not allowed
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    /// A month string that is not a calendar-valid "YYYY-MM"
    #[error("Invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),

    /// A category name outside the fixed set
    #[error("Unknown category '{0}': expected one of Shopping, Utilities, Home, Earnings")]
    UnknownCategory(String),

    /// A ledger row that could not be parsed; the whole load is aborted
    #[error("Malformed ledger record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
}

impl TallyError {
    /// Create an "invalid amount" error
    pub fn invalid_amount(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a "malformed record" error for a ledger line
    pub fn malformed_record(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Check if this is an invalid amount error
    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, Self::InvalidAmount { .. })
    }

    /// Check if this is a malformed ledger record error
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for TallyError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        Self::MalformedRecord {
            line,
            reason: err.to_string(),
        }
    }
}

/// Result type alias for tally operations
pub type TallyResult<T> = Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TallyError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_invalid_amount_error() {
        let err = TallyError::invalid_amount("abc", "not a number");
        assert_eq!(err.to_string(), "Invalid amount 'abc': not a number");
        assert!(err.is_invalid_amount());
        assert!(!err.is_malformed_record());
    }

    #[test]
    fn test_malformed_record_error() {
        let err = TallyError::malformed_record(3, "bad date '2025-13-01'");
        assert_eq!(
            err.to_string(),
            "Malformed ledger record at line 3: bad date '2025-13-01'"
        );
        assert!(err.is_malformed_record());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TallyError = io_err.into();
        assert!(matches!(err, TallyError::Io(_)));
    }
}
