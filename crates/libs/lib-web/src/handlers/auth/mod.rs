//! # Authentication Handlers
//!
//! Registration and login for admins and users. Both roles share the same
//! request shapes and rules; each role has its own username namespace.
//!
//! ## Example
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/admin/register", post(register_admin))
//!     .route("/admin/login", post(login_admin));
//! ```

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use lib_core::dto::{LoginRequest, RegisterRequest, TokenResponse};
use lib_core::model::{LoginCredentials, NewAccount, Role};
use lib_core::AppError;
use tracing::{info, instrument};

use super::json_body;
use crate::services::AccountService;

#[cfg(test)]
mod tests;

/// `POST /admin/register`
#[instrument(skip_all)]
pub async fn register_admin(
    State(accounts): State<AccountService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    register(&accounts, Role::Admin, payload).await
}

/// `POST /admin/login`
#[instrument(skip_all)]
pub async fn login_admin(
    State(accounts): State<AccountService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    login(&accounts, Role::Admin, payload).await
}

/// `POST /user/register`
#[instrument(skip_all)]
pub async fn register_user(
    State(accounts): State<AccountService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    register(&accounts, Role::User, payload).await
}

/// `POST /user/login`
#[instrument(skip_all)]
pub async fn login_user(
    State(accounts): State<AccountService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    login(&accounts, Role::User, payload).await
}

async fn register(
    accounts: &AccountService,
    role: Role,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let account = NewAccount::try_from(json_body(payload)?)?;
    info!("[REGISTER] New {} registration: {}", role, account.username);

    let token = accounts.register(role, account).await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

async fn login(
    accounts: &AccountService,
    role: Role,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let credentials = LoginCredentials::try_from(json_body(payload)?)?;
    info!("[LOGIN] {} login attempt: {}", role, credentials.username);

    let token = accounts.login(role, credentials).await?;

    Ok(Json(TokenResponse { token }))
}
