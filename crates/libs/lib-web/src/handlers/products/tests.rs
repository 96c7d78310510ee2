//! # Item Handler Tests

use axum::http::StatusCode;
use chrono::Duration;
use uuid::Uuid;

use crate::handlers::test_support::{item_body, TestApp};

async fn setup() -> (TestApp, String, String) {
    let app = TestApp::new().await;
    let token = app.register_admin("admin01").await;
    let merchant_id = app.create_merchant(&token, "Kopi Tuku", "BoothKiosk").await;
    (app, token, merchant_id)
}

fn items_uri(merchant_id: &str) -> String {
    format!("/admin/merchants/{merchant_id}/items")
}

#[tokio::test]
async fn test_create_item() {
    // Arrange
    let (app, token, merchant_id) = setup().await;

    // Act
    let (status, body) = app
        .post(
            &items_uri(&merchant_id),
            Some(&token),
            item_body("Es Kopi Susu", "Beverage", 18000.0),
        )
        .await;

    // Assert
    assert_eq!(status, StatusCode::CREATED);
    let item_id = body["itemId"].as_str().unwrap();
    assert!(item_id.parse::<Uuid>().is_ok());

    let (status, list) = app.get(&items_uri(&merchant_id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["meta"]["total"], 1);
    assert_eq!(list["data"][0]["itemId"], item_id);
    assert_eq!(list["data"][0]["productCategory"], "Beverage");
    assert_eq!(list["data"][0]["price"], 18000.0);
}

#[tokio::test]
async fn test_price_below_one_is_rejected() {
    let (app, token, merchant_id) = setup().await;

    let (status, body) = app
        .post(
            &items_uri(&merchant_id),
            Some(&token),
            item_body("Es Kopi Susu", "Beverage", 0.0),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BadInput");

    let (_, list) = app.get(&items_uri(&merchant_id), Some(&token)).await;
    assert_eq!(list["meta"]["total"], 0);
}

#[tokio::test]
async fn test_unknown_category_is_rejected() {
    let (app, token, merchant_id) = setup().await;

    let (status, _) = app
        .post(
            &items_uri(&merchant_id),
            Some(&token),
            item_body("Es Kopi Susu", "Bogus", 5000.0),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_merchant_is_not_found() {
    let (app, token, _) = setup().await;

    let (status, body) = app
        .post(
            &items_uri(&Uuid::now_v7().to_string()),
            Some(&token),
            item_body("Es Kopi Susu", "Beverage", 5000.0),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NotFound");
}

#[tokio::test]
async fn test_malformed_merchant_id_is_bad_input() {
    let (app, token, _) = setup().await;

    let (status, _) = app
        .post(
            &items_uri("not-a-uuid"),
            Some(&token),
            item_body("Es Kopi Susu", "Beverage", 5000.0),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get(&items_uri("not-a-uuid"), Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listing_is_scoped_and_filtered() {
    // Arrange
    let (app, token, merchant_id) = setup().await;
    let other_id = app.create_merchant(&token, "Warung Bu Sri", "SmallRestaurant").await;

    let items = [
        ("Es Kopi Susu", "Beverage"),
        ("Kopi Hitam", "Beverage"),
        ("Roti Bakar", "Food"),
        ("Keripik", "Snack"),
    ];
    for (name, category) in items {
        app.clock.advance(Duration::minutes(1));
        app.post(&items_uri(&merchant_id), Some(&token), item_body(name, category, 12000.0))
            .await;
    }
    app.post(&items_uri(&other_id), Some(&token), item_body("Kopi Tubruk", "Beverage", 8000.0))
        .await;

    // Act
    let (_, all) = app.get(&items_uri(&merchant_id), Some(&token)).await;
    let (_, beverages) = app
        .get(
            &format!("{}?productCategory=Beverage&createdAt=asc", items_uri(&merchant_id)),
            Some(&token),
        )
        .await;
    let (_, by_name) = app
        .get(&format!("{}?name=ROTI", items_uri(&merchant_id)), Some(&token))
        .await;

    // Assert
    assert_eq!(all["meta"]["total"], 4);
    assert_eq!(all["data"][0]["name"], "Keripik");

    assert_eq!(beverages["meta"]["total"], 2);
    assert_eq!(beverages["data"][0]["name"], "Es Kopi Susu");
    assert_eq!(beverages["data"][1]["name"], "Kopi Hitam");

    assert_eq!(by_name["meta"]["total"], 1);
    let item_id = by_name["data"][0]["itemId"].as_str().unwrap();

    let (_, by_id) = app
        .get(&format!("{}?itemId={item_id}", items_uri(&merchant_id)), Some(&token))
        .await;
    assert_eq!(by_id["meta"]["total"], 1);
    assert_eq!(by_id["data"][0]["name"], "Roti Bakar");
}
