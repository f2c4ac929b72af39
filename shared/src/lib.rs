//! CodeClass Shared Library
//!
//! This crate contains the wire types, domain models, and input validation
//! shared between the backend and any client of the CodeClass API.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{Role, User};
pub use types::*;
