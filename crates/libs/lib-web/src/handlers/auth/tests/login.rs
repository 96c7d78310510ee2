//! # Login Tests

use super::*;
use chrono::Duration;
use lib_core::model::store::AccountRepository;
use lib_core::model::Role;

fn credentials(username: &str, password: &str) -> serde_json::Value {
    json!({ "username": username, "password": password })
}

#[tokio::test]
async fn test_login_token_identifies_account() {
    // Arrange
    let app = TestApp::new().await;
    app.register_admin("alice01").await;

    // Act
    let (status, body) = app
        .post("/admin/login", None, credentials("alice01", "secret123"))
        .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let claims = app.claims(body["token"].as_str().unwrap());
    let subject = claims.subject().unwrap();

    let stored = AccountRepository::find_by_username(&app.state.db, Role::Admin, "alice01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(subject.id, stored.id);
    assert_eq!(subject.username, "alice01");
    assert_eq!(subject.email, "a@x.com");
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    // Arrange
    let app = TestApp::new().await;
    app.register_admin("alice01").await;

    // Act
    let (wrong_status, wrong_body) = app
        .post("/admin/login", None, credentials("alice01", "wrongpass"))
        .await;
    let (unknown_status, unknown_body) = app
        .post("/admin/login", None, credentials("nobody99", "secret123"))
        .await;

    // Assert
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_login_is_scoped_to_role() {
    let app = TestApp::new().await;
    app.register_admin("alice01").await;

    let (status, _) = app
        .post("/user/login", None, credentials("alice01", "secret123"))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_login() {
    let app = TestApp::new().await;
    app.register_user("budi_01").await;

    let (status, body) = app
        .post("/user/login", None, credentials("budi_01", "secret123"))
        .await;

    assert_eq!(status, StatusCode::OK);
    let claims = app.claims(body["token"].as_str().unwrap());
    assert_eq!(claims.role, Role::User);
}

#[tokio::test]
async fn test_token_expires_after_ttl() {
    // Arrange
    let app = TestApp::new().await;
    let token = app.register_admin("alice01").await;

    let (status, _) = app.get("/admin/merchants", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    // Act
    app.clock.advance(Duration::hours(72) + Duration::seconds(1));
    let (status, body) = app.get("/admin/merchants", Some(&token)).await;

    // Assert
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "Unauthorized");
}

#[tokio::test]
async fn test_admin_routes_require_admin_token() {
    let app = TestApp::new().await;
    let user_token = app.register_user("budi_01").await;

    let (status, _) = app.get("/admin/merchants", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/admin/merchants", Some("not.a.jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/admin/merchants", Some(&user_token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
