//! Database repositories
//!
//! Provides the credential store used by the auth service. The store is a
//! trait so handlers run unchanged against Postgres or the in-memory
//! implementation used in tests.

pub mod memory;
pub mod user;

use async_trait::async_trait;
use codeclass_shared::{Role, User};
use thiserror::Error;
use uuid::Uuid;

pub use memory::InMemoryUserStore;
pub use user::PgUserStore;

/// A user ready to be persisted; the password is already hashed
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    /// Normalized (trimmed, lower-cased) email
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Credential store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let unique_violation = err
            .as_database_error()
            .map_or(false, |db_err| db_err.is_unique_violation());

        if unique_violation {
            StoreError::DuplicateEmail
        } else {
            StoreError::Backend(err.into())
        }
    }
}

/// Persistent user records
///
/// `create` is the authoritative duplicate check: it must reject an email
/// that is already present atomically with the write, so two concurrent
/// registrations of one email cannot both succeed.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Look up by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Cheap reachability check for readiness probes
    async fn ping(&self) -> Result<(), StoreError>;
}
