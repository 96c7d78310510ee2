//! # HTTP Request Handlers
//!
//! Axum handlers grouped by feature area. Handlers bind and validate the
//! request, call a service from [`crate::services`], and shape the response.
//!
//! - **[`auth`]**: registration and login for both roles
//!   - `POST /admin/register`, `POST /admin/login`
//!   - `POST /user/register`, `POST /user/login`
//! - **[`merchants`]**: admin merchant endpoints
//!   - `POST /admin/merchants`, `GET /admin/merchants`
//! - **[`products`]**: admin item endpoints, scoped to one merchant
//!   - `POST /admin/merchants/{merchantId}/items`
//!   - `GET /admin/merchants/{merchantId}/items`
//!
//! ## Error Handling
//!
//! Handlers return `Result<T, AppError>`; [`AppError`] renders itself as
//! `{ "error", "code" }` with the matching status. Body and query rejections
//! are turned into `BadInput` so every failure has the same shape.

pub mod auth;
pub mod merchants;
pub mod products;

#[cfg(test)]
pub(crate) mod test_support;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query};
use lib_core::AppError;

/// Unwrap a JSON body, turning a rejection into `BadInput`.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadInput(rejection.body_text()))
}

/// Unwrap a query string, turning a rejection into `BadInput`.
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadInput(rejection.body_text()))
}
