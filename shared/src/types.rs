//! API request and response types

use crate::models::{Role, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Authentication Types
// ============================================================================

/// Registration request
///
/// Every field is optional on the wire so that an absent field is reported
/// as a validation error naming that field.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("role", &self.role)
            .finish()
    }
}

/// Login request
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Session token issued on successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Registration acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserProfile,
}

/// User profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_missing_fields_deserialize() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email": "ada@x.com"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("ada@x.com"));
        assert!(req.name.is_none());
        assert!(req.password.is_none());
        assert!(req.role.is_none());
    }

    #[test]
    fn test_register_request_rejects_unknown_role() {
        let result = serde_json::from_str::<RegisterRequest>(
            r#"{"name": "Ada", "email": "ada@x.com", "password": "s3cret", "role": "admin"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let req = LoginRequest {
            email: Some("ada@x.com".to_string()),
            password: Some("s3cret".to_string()),
        };
        let debug_str = format!("{:?}", req);
        assert!(!debug_str.contains("s3cret"));
        assert!(debug_str.contains("REDACTED"));
    }
}
