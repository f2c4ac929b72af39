//! Authentication routes
//!
//! Provides endpoints for user registration, login, and the current
//! user's profile.
//!
//! # Performance Optimizations
//!
//! - Uses pre-computed JWT keys from AppState (no per-request allocation)
//! - Password hashing runs on blocking thread pool (doesn't block async runtime)

use crate::auth::{require_auth, AuthUser};
use crate::error::ApiResult;
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use codeclass_shared::types::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserProfile,
};

/// Create auth routes
///
/// `/me` sits behind the `require_auth` layer; the others are public.
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(get_profile))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}

/// Register a new user
///
/// POST /api/auth/register
///
/// No token is issued; the client logs in separately.
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(req) = payload?;
    let user = AuthService::register(state.users(), req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserProfile::from(&user),
        }),
    ))
}

/// Login with email and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;
    let response = AuthService::login(state.users(), state.jwt(), req).await?;
    Ok(Json(response))
}

/// Get current user profile (requires authentication)
///
/// GET /api/auth/me
async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> ApiResult<Json<UserProfile>> {
    let profile = AuthService::get_profile(state.users(), auth_user.user_id).await?;
    Ok(Json(profile))
}
