//! Input validation functions
//!
//! This module provides validation utilities for user input.
//! Email syntax checking is delegated to the `validator` crate.

use crate::errors::ValidationError;
use validator::ValidateEmail;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Unwrap a required field, rejecting absent values
pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::missing(field))
}

/// Canonical form of an email used as the login key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::missing("name"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::new("name", "Name too long"));
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::missing("email"));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::new("email", "Email too long"));
    }
    if !email.validate_email() {
        return Err(ValidationError::new("email", "Invalid email format"));
    }
    Ok(())
}

/// Validate password
///
/// Only presence and an upper bound are enforced; the hasher accepts any
/// non-empty byte string.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::missing("password"));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(ValidationError::new("password", "Password too long"));
    }
    Ok(())
}
