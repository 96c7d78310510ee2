//! # JWT Token Management
//!
//! Issues and verifies HS256 tokens for admin and user accounts.
//!
//! Identity claims (`sub`, `email`, `username`) are each base64url-encoded on
//! their own. That is an encoding, not encryption: the signature protects
//! integrity only, so nothing secret belongs in a claim.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lib_utils::{b64u_decode_to_string, b64u_encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AuthError;

/// Account role partition. Admin and user accounts live in separate namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

/// Decoded identity carried by a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
}

/// JWT Claims structure as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID, base64url)
    pub sub: String,
    /// Email (base64url)
    pub email: String,
    /// Username (base64url)
    pub username: String,
    /// Role partition the account belongs to
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Decode the encoded identity claims back into a [`TokenSubject`].
    pub fn subject(&self) -> Result<TokenSubject, AuthError> {
        let claim = |value: &str| {
            b64u_decode_to_string(value).map_err(|e| AuthError::TokenInvalid(e.to_string()))
        };

        let id = claim(&self.sub)?
            .parse::<Uuid>()
            .map_err(|e| AuthError::TokenInvalid(e.to_string()))?;

        Ok(TokenSubject {
            id,
            email: claim(&self.email)?,
            username: claim(&self.username)?,
            role: self.role,
        })
    }
}

/// Encode a JWT token for `subject`, valid for `expiration_hours` from now.
pub fn encode_jwt(
    subject: &TokenSubject,
    secret: &str,
    expiration_hours: i64,
) -> Result<String, AuthError> {
    encode_jwt_at(subject, secret, expiration_hours, Utc::now())
}

/// Encode a JWT token as if issued at `now`.
pub fn encode_jwt_at(
    subject: &TokenSubject,
    secret: &str,
    expiration_hours: i64,
    now: DateTime<Utc>,
) -> Result<String, AuthError> {
    let exp = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: b64u_encode(subject.id.to_string()),
        email: b64u_encode(&subject.email),
        username: b64u_encode(&subject.username),
        role: subject.role,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenEncode(e.to_string()))
}

/// Decode and validate a JWT token against the system clock.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode_jwt_at(token, secret, Utc::now())
}

/// Decode and validate a JWT token, judging expiry against `now`.
///
/// A token is expired once `now` reaches its `exp`; there is no leeway.
pub fn decode_jwt_at(token: &str, secret: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against the supplied clock.
    validation.validate_exp = false;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| AuthError::TokenInvalid(e.to_string()))?;

    if token_data.claims.exp <= now.timestamp() {
        return Err(AuthError::TokenExpired);
    }

    Ok(token_data.claims)
}
