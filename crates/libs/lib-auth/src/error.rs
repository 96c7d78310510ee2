//! # Authentication Errors

use thiserror::Error;

/// Failures raised while hashing credentials or minting/verifying tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The hashing parameters were rejected or hashing itself failed.
    #[error("Failed to hash password: {0}")]
    Hash(String),

    /// A stored hash could not be parsed.
    #[error("Failed to parse hash: {0}")]
    InvalidHash(String),

    /// Signing the token failed.
    #[error("Failed to encode JWT: {0}")]
    TokenEncode(String),

    /// Bad signature, malformed token, or undecodable claims.
    #[error("Invalid token: {0}")]
    TokenInvalid(String),

    #[error("Token expired")]
    TokenExpired,
}

impl AuthError {
    /// True when the failure is about the caller's token rather than a server fault.
    pub fn is_token_rejection(&self) -> bool {
        matches!(self, AuthError::TokenInvalid(_) | AuthError::TokenExpired)
    }
}
