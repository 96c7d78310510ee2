//! # Account Data Transfer Objects
//!
//! - `POST /admin/register`, `POST /user/register` - [`RegisterRequest`] -> [`TokenResponse`]
//! - `POST /admin/login`, `POST /user/login` - [`LoginRequest`] -> [`TokenResponse`]

use lib_utils::{validate_email, validate_length};
use serde::{Deserialize, Serialize};

use crate::model::{LoginCredentials, NewAccount};
use crate::AppError;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl TryFrom<RegisterRequest> for NewAccount {
    type Error = AppError;

    fn try_from(req: RegisterRequest) -> Result<Self, Self::Error> {
        validate_length(&req.username, 5, 30, "username").map_err(AppError::BadInput)?;
        validate_length(&req.password, 5, 30, "password").map_err(AppError::BadInput)?;
        validate_email(&req.email).map_err(AppError::BadInput)?;

        Ok(NewAccount {
            username: req.username,
            email: req.email,
            password: req.password,
        })
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = AppError;

    fn try_from(req: LoginRequest) -> Result<Self, Self::Error> {
        validate_length(&req.username, 5, 30, "username").map_err(AppError::BadInput)?;
        validate_length(&req.password, 5, 30, "password").map_err(AppError::BadInput)?;

        Ok(LoginCredentials {
            username: req.username,
            password: req.password,
        })
    }
}

/// Issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
