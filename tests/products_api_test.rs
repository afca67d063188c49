mod common;

use axum::http::{Method, StatusCode};
use northwind_api::entities::product;
use sea_orm::EntityTrait;
use serde_json::json;

use common::{read_json, TestApp};

#[tokio::test]
async fn list_products_returns_seeded_rows() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/Product", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    let products = body.as_array().expect("product array");
    assert_eq!(products.len(), 4);
    assert_eq!(products[0]["ProductName"], "Chai");
    assert_eq!(products[0]["RowVersion"], 0);
}

#[tokio::test]
async fn create_product_generates_identifier() {
    let app = TestApp::new().await;

    let payload = json!({
        "ProductId": 0,
        "CategoryId": 3,
        "ProductName": "Teatime Chocolate Biscuits",
        "UnitPrice": "9.20"
    });

    let response = app.request(Method::POST, "/api/Product", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    assert_eq!(body["ProductId"], 5);
    assert_eq!(body["RowVersion"], 0);
    assert!(!body["Discontinued"].as_bool().unwrap());
}

#[tokio::test]
async fn update_product_increments_row_version() {
    let app = TestApp::new().await;

    let payload = json!({
        "ProductId": 1,
        "CategoryId": 1,
        "ProductName": "Chai Extra Strong",
        "UnitPrice": "25.00",
        "RowVersion": 0
    });

    let response = app
        .request(Method::PUT, "/api/Product/1", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["ProductName"], "Chai Extra Strong");
    assert_eq!(body["RowVersion"], 1);
}

#[tokio::test]
async fn update_product_with_stale_token_is_rejected() {
    let app = TestApp::new().await;

    let first = json!({
        "ProductId": 1,
        "CategoryId": 1,
        "ProductName": "Chai Reserve",
        "UnitPrice": "26.00",
        "RowVersion": 0
    });
    let response = app.request(Method::PUT, "/api/Product/1", Some(first)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Same token again: the first writer already advanced it.
    let stale = json!({
        "ProductId": 1,
        "CategoryId": 1,
        "ProductName": "Chai Knockoff",
        "UnitPrice": "1.00",
        "RowVersion": 0
    });
    let response = app.request(Method::PUT, "/api/Product/1", Some(stale)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The losing write left the stored row unmodified.
    let current = product::Entity::find_by_id(1)
        .one(&*app.state.db)
        .await
        .expect("query product")
        .expect("product exists");
    assert_eq!(current.product_name, "Chai Reserve");
    assert_eq!(current.row_version, 1);
}

#[tokio::test]
async fn update_product_with_mismatched_id_is_rejected() {
    let app = TestApp::new().await;

    let payload = json!({
        "ProductId": 2,
        "CategoryId": 1,
        "ProductName": "Chang",
        "UnitPrice": "23",
        "RowVersion": 0
    });

    let response = app
        .request(Method::PUT, "/api/Product/1", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_missing_product_returns_not_found() {
    let app = TestApp::new().await;

    let payload = json!({
        "ProductId": 999,
        "CategoryId": 1,
        "ProductName": "Ghost",
        "UnitPrice": "1",
        "RowVersion": 0
    });

    let response = app
        .request(Method::PUT, "/api/Product/999", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_product_referenced_by_order_line_is_blocked() {
    let app = TestApp::new().await;

    // Product 1 appears on seeded order 1; the no-cascade foreign key
    // protects it.
    let response = app.request(Method::DELETE, "/api/Product/1", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let still_there = product::Entity::find_by_id(1)
        .one(&*app.state.db)
        .await
        .expect("query product");
    assert!(still_there.is_some());
}

#[tokio::test]
async fn delete_unreferenced_product_succeeds() {
    let app = TestApp::new().await;

    // Product 4 is seeded but never ordered.
    let response = app.request(Method::DELETE, "/api/Product/4", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/api/Product/4", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_and_get_categories() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/Category", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(8));

    let response = app.request(Method::GET, "/api/Category/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["CategoryName"], "Beverages");

    let response = app.request(Method::GET, "/api/Category/99", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
