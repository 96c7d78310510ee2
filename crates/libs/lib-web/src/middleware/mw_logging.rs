//! # Request/Response Logging Middleware
//!
//! One line when a request arrives and one when it leaves, correlated by the
//! id from [`stamp_req`](super::stamp_req). Headers go out at debug level
//! with credentials redacted. Bodies are never read here.

use std::time::Instant;

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use tracing::{debug, error, info, warn};

use super::RequestStamp;

const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "x-api-key", "x-auth-token"];
const REDACTED: &str = "***REDACTED***";

/// Header pairs safe to log. Non-UTF-8 values are dropped.
fn loggable_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            // HeaderName is always lowercase.
            if SENSITIVE_HEADERS.contains(&name.as_str()) {
                return Some((name.to_string(), REDACTED.to_string()));
            }
            value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
        })
        .collect()
}

pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let request_id = req
        .extensions()
        .get::<RequestStamp>()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string());

    info!(
        request_id = %request_id,
        query = ?req.uri().query(),
        "[REQUEST] {} {}",
        method,
        path
    );
    debug!(request_id = %request_id, headers = ?loggable_headers(req.headers()), "[REQUEST HEADERS]");

    let response = next.run(req).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();
    let line = format!("[RESPONSE] {} {} -> {} ({}ms)", method, path, status.as_u16(), duration_ms);

    match status.as_u16() {
        500..=599 => error!(request_id = %request_id, status = status.as_u16(), duration_ms, "{}", line),
        400..=499 => warn!(request_id = %request_id, status = status.as_u16(), duration_ms, "{}", line),
        _ => info!(request_id = %request_id, status = status.as_u16(), duration_ms, "{}", line),
    }

    response
}
