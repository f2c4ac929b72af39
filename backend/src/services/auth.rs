//! Auth service for registration, login, and profile lookup
//!
//! Each operation returns its own error enum so callers match on exactly
//! the outcomes that operation can produce.
//!
//! # Performance
//!
//! - Password hashing/verification runs on the blocking thread pool
//! - JWT service is passed by reference (pre-computed keys)

use crate::auth::{JwtService, PasswordService, TokenError};
use crate::error::ApiError;
use crate::repositories::{NewUser, StoreError, UserStore};
use codeclass_shared::validation::{
    normalize_email, require, validate_email, validate_name, validate_password,
};
use codeclass_shared::{
    LoginRequest, LoginResponse, RegisterRequest, Role, User, UserProfile, ValidationError,
};
use secrecy::SecretString;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Registration failure kinds
#[derive(Error, Debug)]
pub enum RegisterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Registration failed: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Login failure kinds
#[derive(Error, Debug)]
pub enum LoginError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unknown email and wrong password are indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Login failed: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Profile lookup failure kinds
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("User not found")]
    NotFound,

    #[error("Profile lookup failed: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for RegisterError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => RegisterError::DuplicateEmail,
            StoreError::Backend(e) => RegisterError::Internal(e),
        }
    }
}

impl From<StoreError> for LoginError {
    fn from(err: StoreError) -> Self {
        LoginError::Internal(err.into())
    }
}

impl From<TokenError> for LoginError {
    fn from(err: TokenError) -> Self {
        LoginError::Internal(err.into())
    }
}

impl From<StoreError> for ProfileError {
    fn from(err: StoreError) -> Self {
        ProfileError::Internal(err.into())
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::Validation(e) => e.into(),
            RegisterError::DuplicateEmail => ApiError::DuplicateEmail,
            RegisterError::Internal(e) => ApiError::Internal(e),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::Validation(e) => e.into(),
            LoginError::InvalidCredentials => ApiError::InvalidCredentials,
            LoginError::Internal(e) => ApiError::Internal(e),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound => ApiError::NotFound("User not found".to_string()),
            ProfileError::Internal(e) => ApiError::Internal(e),
        }
    }
}

/// Validated registration input
pub struct RegisterCommand {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
}

impl TryFrom<RegisterRequest> for RegisterCommand {
    type Error = ValidationError;

    fn try_from(req: RegisterRequest) -> Result<Self, Self::Error> {
        let name = require("name", req.name)?;
        validate_name(&name)?;
        let email = require("email", req.email)?;
        validate_email(&email)?;
        let password = require("password", req.password)?;
        validate_password(&password)?;
        let role = require("role", req.role)?;

        Ok(Self {
            name: name.trim().to_string(),
            email: normalize_email(&email),
            password: SecretString::new(password),
            role,
        })
    }
}

/// Validated login input
pub struct LoginCommand {
    pub email: String,
    pub password: SecretString,
}

impl TryFrom<LoginRequest> for LoginCommand {
    type Error = ValidationError;

    fn try_from(req: LoginRequest) -> Result<Self, Self::Error> {
        let email = require("email", req.email)?;
        if email.trim().is_empty() {
            return Err(ValidationError::missing("email"));
        }
        let password = require("password", req.password)?;
        if password.is_empty() {
            return Err(ValidationError::missing("password"));
        }

        Ok(Self {
            email: normalize_email(&email),
            password: SecretString::new(password),
        })
    }
}

/// Auth service operations
pub struct AuthService;

impl AuthService {
    /// Hash the password and build the record to persist
    ///
    /// Kept separate from `register` so hashing never depends on the store.
    pub async fn prepare_new_user(cmd: RegisterCommand) -> anyhow::Result<NewUser> {
        let password_hash = PasswordService::hash_async(cmd.password).await?;

        Ok(NewUser {
            name: cmd.name,
            email: cmd.email,
            password_hash,
            role: cmd.role,
        })
    }

    /// Register a new user
    ///
    /// No existence pre-check: the store's uniqueness constraint on write
    /// is the only duplicate signal.
    pub async fn register(store: &dyn UserStore, req: RegisterRequest) -> Result<User, RegisterError> {
        let cmd = RegisterCommand::try_from(req)?;
        let new_user = Self::prepare_new_user(cmd).await?;

        let user = store.create(new_user).await.map_err(|e| {
            if matches!(e, StoreError::DuplicateEmail) {
                debug!("Registration rejected: email already registered");
            }
            RegisterError::from(e)
        })?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Login with email and password
    ///
    /// Issues a session token carrying the user id and role.
    pub async fn login(
        store: &dyn UserStore,
        jwt_service: &JwtService,
        req: LoginRequest,
    ) -> Result<LoginResponse, LoginError> {
        let cmd = LoginCommand::try_from(req)?;

        let Some(user) = store.find_by_email(&cmd.email).await? else {
            // Same hashing cost as a real mismatch
            PasswordService::verify_dummy(cmd.password).await?;
            debug!("Login rejected: invalid credentials");
            return Err(LoginError::InvalidCredentials);
        };

        let valid = PasswordService::verify_async(cmd.password, user.password_hash.clone()).await?;
        if !valid {
            debug!("Login rejected: invalid credentials");
            return Err(LoginError::InvalidCredentials);
        }

        let (token, _) = jwt_service.issue_session(user.id, user.role)?;

        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_service.session_ttl_secs(),
        })
    }

    /// Get user profile
    pub async fn get_profile(store: &dyn UserStore, user_id: Uuid) -> Result<UserProfile, ProfileError> {
        let user = store
            .find_by_id(user_id)
            .await?
            .ok_or(ProfileError::NotFound)?;

        Ok(UserProfile::from(&user))
    }
}
