//! Error types for the CodeClass application

use thiserror::Error;

/// A single rejected input field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Error for a field that was absent or blank
    pub fn missing(field: &'static str) -> Self {
        Self::new(field, format!("{} is required", field))
    }
}

/// Error parsing a role name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);
