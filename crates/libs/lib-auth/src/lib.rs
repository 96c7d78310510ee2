//! # Authentication Library
//!
//! Password hashing and JWT token management for admin and user accounts.

pub mod error;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use pwd::{hash_password, verify_password};
pub use token::{decode_jwt, decode_jwt_at, encode_jwt, encode_jwt_at, Claims, Role, TokenSubject};
