//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! # Design Principles
//!
//! 1. **Pre-compute expensive resources**: JWT keys, DB pools are created once
//! 2. **Cheap cloning**: All fields use Arc or are already Clone-cheap
//! 3. **Immutable after creation**: State is read-only during request handling

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::{InMemoryUserStore, PgUserStore, UserStore};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Credential store
    pub users: Arc<dyn UserStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
}

impl AppState {
    /// Create a new application state
    ///
    /// The signing secret is taken from `config` here and nowhere else.
    pub fn new(users: Arc<dyn UserStore>, config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.session_ttl_secs);

        Self {
            users,
            config: Arc::new(config),
            jwt,
        }
    }

    /// State backed by a Postgres pool
    pub fn with_postgres(pool: PgPool, config: AppConfig) -> Self {
        Self::new(Arc::new(PgUserStore::new(pool)), config)
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(Arc::new(InMemoryUserStore::new()), config)
    }

    /// Get a reference to the credential store
    #[inline]
    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
