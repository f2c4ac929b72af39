//! Authentication module
//!
//! Provides JWT session tokens, argon2 password hashing, and the bearer
//! token guard for protected routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, TokenError};
pub use middleware::{authenticate, require_auth, AuthUser};
pub use password::PasswordService;
