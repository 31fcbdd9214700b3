//! Custom error types for the buyback wizard
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for buyback operations
#[derive(Error, Debug)]
pub enum BuybackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A step refused its input; the wizard state was not touched
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage port errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// The submission sink rejected or failed to receive the payload
    #[error("Submission failed: {0}")]
    Submission(String),

    /// Remote price table lookup failed
    #[error("Price lookup failed: {0}")]
    PriceLookup(String),

    /// Operation not allowed at the current step
    #[error("Not allowed at step '{step}': {reason}")]
    InvalidStep { step: String, reason: String },
}

impl BuybackError {
    /// Create a validation error for a missing required field
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("{} is required", field))
    }

    /// Create a validation error for a malformed field value
    pub fn invalid_field(field: &str, value: impl std::fmt::Display) -> Self {
        Self::Validation(format!("Invalid {}: '{}'", field, value))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a submission error
    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Submission(_))
    }
}

impl From<std::io::Error> for BuybackError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BuybackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for buyback operations
pub type BuybackResult<T> = Result<T, BuybackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuybackError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_missing_field() {
        let err = BuybackError::missing_field("brand");
        assert_eq!(err.to_string(), "Validation error: brand is required");
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_step_display() {
        let err = BuybackError::InvalidStep {
            step: "Review".into(),
            reason: "nothing to complete".into(),
        };
        assert_eq!(
            err.to_string(),
            "Not allowed at step 'Review': nothing to complete"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BuybackError = io_err.into();
        assert!(matches!(err, BuybackError::Io(_)));
    }
}
