//! # Request Stamping Middleware
//!
//! Every request gets a [`RequestStamp`] in its extensions and the id is
//! echoed back in `X-Request-ID`. A caller-supplied `X-Request-ID` is kept
//! when it is a UUID, so a proxy's correlation id survives; anything else
//! is replaced with a fresh one.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone, Debug)]
pub struct RequestStamp {
    pub id: String,
    pub received_at: DateTime<Utc>,
}

impl RequestStamp {
    fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .unwrap_or_else(Uuid::new_v4);

        Self {
            id: id.to_string(),
            received_at: lib_utils::now_utc(),
        }
    }
}

pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::from_headers(req.headers());
    let id = stamp.id.clone();
    req.extensions_mut().insert(stamp);

    let mut res = next.run(req).await;

    // Hyphenated UUIDs are always valid header values.
    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}
