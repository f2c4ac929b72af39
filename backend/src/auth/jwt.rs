//! Session token issuing and verification
//!
//! Tokens are HS256 JWTs carrying the user id and role. Keys are derived
//! once from the configured secret and shared through `Arc`.

use chrono::{Duration, Utc};
use codeclass_shared::Role;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Session token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Claims for `user_id` valid from now for `ttl`
    pub fn new(user_id: Uuid, role: Role, ttl: Duration) -> Result<Self, TokenError> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or(TokenError::LifetimeOutOfRange)?;

        Ok(Self {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Token failure kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Malformed token")]
    Malformed,

    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Token lifetime out of range")]
    LifetimeOutOfRange,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token issuer and verifier
///
/// Construct once at startup from configuration and store in `AppState`.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    session_ttl_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, session_ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            session_ttl_secs,
        }
    }

    /// Sign the given claims
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.keys.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Issue a session token with the configured lifetime
    pub fn issue_session(&self, user_id: Uuid, role: Role) -> Result<(String, Claims), TokenError> {
        let ttl = Duration::try_seconds(self.session_ttl_secs)
            .ok_or(TokenError::LifetimeOutOfRange)?;
        let claims = Claims::new(user_id, role, ttl)?;
        let token = self.issue(&claims)?;
        Ok((token, claims))
    }

    /// Verify a token and return its claims
    ///
    /// The signature is checked before any claim is read; expiry second.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.keys.decoding, &self.validation)?;
        let claims = token_data.claims;

        // jsonwebtoken accepts exp == now; a session is only valid strictly before exp
        if claims.is_expired() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    #[inline]
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret", 3600)
    }

    #[test]
    fn test_issue_and_verify_returns_same_claims() {
        let service = create_test_service();
        let claims = Claims::new(Uuid::new_v4(), Role::Professor, Duration::hours(1)).unwrap();

        let token = service.issue(&claims).unwrap();
        let verified = service.verify(&token).unwrap();

        assert_eq!(verified, claims);
    }

    #[test]
    fn test_issue_session_uses_configured_ttl() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let (token, claims) = service.issue_session(user_id, Role::Student).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(service.verify(&token).unwrap().sub, user_id);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();
        let claims = Claims::new(Uuid::new_v4(), Role::Student, Duration::seconds(-10)).unwrap();

        let token = service.issue(&claims).unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_expiring_now_rejected() {
        let service = create_test_service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Student,
            iat: now - 3600,
            exp: now,
        };

        let token = service.issue(&claims).unwrap();

        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = JwtService::new("secret-one", 3600);
        let verifier = JwtService::new("secret-two", 3600);

        let (token, _) = issuer.issue_session(Uuid::new_v4(), Role::Student).unwrap();

        assert_eq!(verifier.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_bad_signature_checked_before_expiry() {
        let issuer = JwtService::new("secret-one", 3600);
        let verifier = JwtService::new("secret-two", 3600);
        let claims = Claims::new(Uuid::new_v4(), Role::Student, Duration::seconds(-10)).unwrap();

        let token = issuer.issue(&claims).unwrap();

        assert_eq!(verifier.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let service = create_test_service();
        let (token, _) = service.issue_session(Uuid::new_v4(), Role::Student).unwrap();
        let (other_token, _) = service.issue_session(Uuid::new_v4(), Role::Professor).unwrap();

        // Splice another token's payload under this token's signature
        let parts: Vec<&str> = token.split('.').collect();
        let other: Vec<&str> = other_token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other[1], parts[2]);

        assert_eq!(service.verify(&forged), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let service = create_test_service();
        assert_eq!(service.verify("invalid.token.here"), Err(TokenError::Malformed));
        assert_eq!(service.verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_oversized_session_ttl_is_error() {
        let service = JwtService::new("test-secret", 10_000_000_000_000);

        let result = service.issue_session(Uuid::new_v4(), Role::Student);

        assert_eq!(result.map(|_| ()), Err(TokenError::LifetimeOutOfRange));
    }

    #[test]
    fn test_claims_past_max_datetime_is_error() {
        let result = Claims::new(Uuid::new_v4(), Role::Student, Duration::MAX);
        assert_eq!(result, Err(TokenError::LifetimeOutOfRange));
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let _cloned = service.clone(); // Should be cheap due to Arc
    }
}
