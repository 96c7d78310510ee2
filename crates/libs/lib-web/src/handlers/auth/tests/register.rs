//! # Registration Tests

use super::*;
use lib_auth::Role;
use lib_utils::b64u_encode;

async fn count(app: &TestApp, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&app.state.db)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_register_admin_returns_token() {
    // Arrange
    let app = TestApp::new().await;

    // Act
    let (status, body) = app
        .post(
            "/admin/register",
            None,
            json!({ "username": "alice01", "password": "secret123", "email": "a@x.com" }),
        )
        .await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    let token = body["token"].as_str().expect("token should be present");
    let claims = app.claims(token);
    assert_eq!(claims.username, b64u_encode("alice01"));
    assert_eq!(claims.role, Role::Admin);
}

#[tokio::test]
async fn test_duplicate_username_is_conflict() {
    // Arrange
    let app = TestApp::new().await;
    app.register_admin("alice01").await;

    // Act
    let (status, body) = app
        .post(
            "/admin/register",
            None,
            json!({ "username": "alice01", "password": "other-pass", "email": "b@x.com" }),
        )
        .await;

    // Assert
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "Conflict");
    assert_eq!(count(&app, "admins").await, 1);
    assert_eq!(count(&app, "admin_usernames").await, 1);
}

#[tokio::test]
async fn test_roles_have_separate_namespaces() {
    // Arrange
    let app = TestApp::new().await;
    app.register_admin("alice01").await;

    // Act
    let (status, _) = app
        .post(
            "/user/register",
            None,
            json!({ "username": "alice01", "password": "secret123", "email": "a@x.com" }),
        )
        .await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(count(&app, "users").await, 1);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    let cases = [
        json!({ "username": "bob", "password": "secret123", "email": "a@x.com" }),
        json!({ "username": "alice01", "password": "1234", "email": "a@x.com" }),
        json!({ "username": "alice01", "password": "secret123", "email": "not-an-email" }),
        json!({ "username": "alice01", "password": "secret123" }),
    ];

    for case in cases {
        let (status, body) = app.post("/user/register", None, case.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {case}");
        assert_eq!(body["code"], "BadInput");
    }

    assert_eq!(count(&app, "users").await, 0);
}

#[tokio::test]
async fn test_missing_body_is_bad_input() {
    let app = TestApp::new().await;

    let (status, body) = app.send("POST", "/admin/register", None, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BadInput");
}

#[tokio::test]
async fn test_concurrent_registration_yields_one_account() {
    // Arrange
    let app = TestApp::new().await;
    let racer = || json!({ "username": "racer01", "password": "secret123", "email": "r@x.com" });

    // Act
    let (first, second) = tokio::join!(
        app.post("/admin/register", None, racer()),
        app.post("/admin/register", None, racer()),
    );

    // Assert
    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);

    let loser = if first.0 == StatusCode::CONFLICT { first.1 } else { second.1 };
    let (_, late) = app.post("/admin/register", None, racer()).await;
    assert_eq!(loser, late);
    assert_eq!(loser["code"], "Conflict");

    assert_eq!(count(&app, "admins").await, 1);
    assert_eq!(count(&app, "admin_usernames").await, 1);
}
