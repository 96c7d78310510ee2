//! Shared fixtures for handler tests: an in-memory database, a manual clock,
//! sequential ids, and the real router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use lib_core::model::store::connect_in_memory;
use lib_auth::{decode_jwt_at, Claims};
use lib_core::{Clock, Config, ManualClock, SequentialIds};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::server::{create_router, AppState};

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration_hours: 72,
        hash_cost: 1,
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = connect_in_memory()
            .await
            .expect("Failed to create test database");
        let clock = Arc::new(ManualClock::new(start_time()));
        let state = AppState::new(
            pool,
            test_config(),
            clock.clone(),
            Arc::new(SequentialIds::default()),
        );
        let router = create_router(state.clone(), vec![]);

        Self {
            router,
            state,
            clock,
        }
    }

    /// Verify `token` against the app clock, which is where it was issued.
    pub fn claims(&self, token: &str) -> Claims {
        decode_jwt_at(token, TEST_SECRET, self.clock.now()).expect("token should verify")
    }

    /// Send a request through the router; the body is parsed as JSON when possible.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, token, Some(body)).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("GET", uri, token, None).await
    }

    /// Register an admin with password `secret123`; returns the token.
    pub async fn register_admin(&self, username: &str) -> String {
        self.register("/admin/register", username).await
    }

    /// Register a user with password `secret123`; returns the token.
    pub async fn register_user(&self, username: &str) -> String {
        self.register("/user/register", username).await
    }

    async fn register(&self, uri: &str, username: &str) -> String {
        let (status, body) = self
            .post(
                uri,
                None,
                json!({ "username": username, "password": "secret123", "email": "a@x.com" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Create a merchant as the admin behind `token`; returns its id.
    pub async fn create_merchant(&self, token: &str, name: &str, category: &str) -> String {
        let (status, body) = self
            .post(
                "/admin/merchants",
                Some(token),
                merchant_body(name, category),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "merchant creation failed: {body}");
        body["merchantId"].as_str().unwrap().to_string()
    }
}

pub fn merchant_body(name: &str, category: &str) -> Value {
    json!({
        "name": name,
        "merchantCategory": category,
        "imageUrl": "https://img.example.com/merchant.jpg",
        "location": { "lat": -6.2, "long": 106.8 }
    })
}

pub fn item_body(name: &str, category: &str, price: f64) -> Value {
    json!({
        "name": name,
        "productCategory": category,
        "price": price,
        "imageUrl": "https://img.example.com/item.jpg"
    })
}
