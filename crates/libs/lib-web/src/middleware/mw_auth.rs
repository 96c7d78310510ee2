//! # Authentication Middleware
//!
//! Verifies the `Authorization: Bearer <token>` header on admin routes and
//! hands the caller's identity to handlers as a typed [`CurrentAccount`]
//! request extension.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let admin = Router::new()
//!     .route("/admin/merchants", post(create_merchant))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_admin));
//! ```
//!
//! Handlers then take `Extension<CurrentAccount>` and pass its `id` on
//! explicitly.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use lib_auth::{decode_jwt_at, Role};
use lib_core::AppError;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::server::AppState;

/// Authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAccount {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Reject the request unless it carries a valid, unexpired admin token.
///
/// Expiry is judged against the application clock.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current = authenticate(&state, req.headers())?;

    if current.role != Role::Admin {
        warn!("[AUTH] {} token used on admin route", current.role);
        return Err(AppError::Unauthorized("admin access required".to_string()));
    }

    debug!("[AUTH] Authenticated admin: {} (id: {})", current.username, current.id);
    req.extensions_mut().insert(current);

    Ok(next.run(req).await)
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<CurrentAccount, AppError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            warn!("[AUTH] Missing or malformed Authorization header");
            AppError::Unauthorized("missing bearer token".to_string())
        })?;

    let claims = decode_jwt_at(token, &state.config.jwt_secret, state.clock.now()).map_err(|e| {
        warn!("[AUTH] JWT validation failed: {}", e);
        AppError::from(e)
    })?;
    let subject = claims.subject()?;

    Ok(CurrentAccount {
        id: subject.id,
        username: subject.username,
        email: subject.email,
        role: subject.role,
    })
}
