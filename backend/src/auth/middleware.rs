//! Authentication middleware
//!
//! Bearer-token guard for protected routes, available both as an extractor
//! (`AuthUser`) and as a layer (`require_auth`) for whole route groups.
//! Every failure maps to 401; the reason is only logged.

use super::jwt::{JwtService, TokenError};
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use codeclass_shared::Role;
use tracing::debug;
use uuid::Uuid;

/// Authenticated caller, decoded from a verified session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Gate an operation on the caller's role
    pub fn require_role(&self, role: Role) -> Result<(), ApiError> {
        if self.role == role {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!("Requires {} role", role)))
        }
    }
}

/// Pull the bearer token out of the headers and verify it
pub fn authenticate(headers: &HeaderMap, jwt: &JwtService) -> Result<AuthUser, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

    let claims = jwt.verify(token).map_err(|e| {
        debug!(reason = %e, "Rejected bearer token");
        match e {
            TokenError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            _ => ApiError::Unauthorized("Invalid token".to_string()),
        }
    })?;

    Ok(AuthUser {
        user_id: claims.sub,
        role: claims.role,
    })
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already verified by `require_auth` on this route group
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(*user);
        }

        let app_state = AppState::from_ref(state);
        authenticate(&parts.headers, app_state.jwt())
    }
}

/// Middleware for authentication (alternative to the extractor)
///
/// Apply with `axum::middleware::from_fn_with_state`. On success the
/// `AuthUser` is placed in the request extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(request.headers(), state.jwt())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
