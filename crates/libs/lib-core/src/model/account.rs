//! # Accounts
//!
//! Admin and user accounts. Both roles share one shape; each role keeps its
//! own tables and therefore its own username namespace.

use chrono::{DateTime, Utc};
use lib_auth::TokenSubject;
use uuid::Uuid;

pub use lib_auth::Role;

/// A persisted account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Identity claims to put in a token for this account.
    pub fn token_subject(&self) -> TokenSubject {
        TokenSubject {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// Validated registration input. The password is still plaintext here.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Validated login input.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Row data for a new account; the password is already hashed.
#[derive(Debug, Clone)]
pub struct AccountForCreate {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
