//! Shared primitives for all Rust crates in the doc-host service.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across doc-host crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or missing input.
    #[error("{0}")]
    Validation(String),

    /// Caller presented credentials that did not match.
    #[error("{0}")]
    Unauthorized(String),

    /// Request body exceeded the configured size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Storage or other unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Internal(format!("storage i/o failure: {value}"))
    }
}
