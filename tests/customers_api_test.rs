mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{read_json, TestApp};

#[tokio::test]
async fn list_customers_returns_seeded_rows() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/Customer", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    let customers = body.as_array().expect("customer array");
    assert_eq!(customers.len(), 3);
    assert_eq!(customers[0]["CustomerId"], "ALFKI");
    assert_eq!(customers[0]["CompanyName"], "Alfreds Futterkiste");
}

#[tokio::test]
async fn get_missing_customer_returns_not_found() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/Customer/NOONE", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_and_fetch_customer() {
    let app = TestApp::new().await;

    let payload = json!({
        "CustomerId": "BERGS",
        "CompanyName": "Berglunds snabbköp",
        "ContactName": "Christina Berglund",
        "City": "Luleå",
        "Country": "Sweden"
    });

    let response = app
        .request(Method::POST, "/api/Customer", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.request(Method::GET, "/api/Customer/BERGS", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["CompanyName"], "Berglunds snabbköp");
}

#[tokio::test]
async fn create_customer_with_overlong_id_is_rejected() {
    let app = TestApp::new().await;

    let payload = json!({
        "CustomerId": "TOOLONG",
        "CompanyName": "Oversize Codes Inc"
    });

    let response = app
        .request(Method::POST, "/api/Customer", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_customer_with_mismatched_id_is_rejected() {
    let app = TestApp::new().await;

    let payload = json!({
        "CustomerId": "ANATR",
        "CompanyName": "Renamed"
    });

    let response = app
        .request(Method::PUT, "/api/Customer/ALFKI", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_customer_replaces_fields() {
    let app = TestApp::new().await;

    let payload = json!({
        "CustomerId": "ALFKI",
        "CompanyName": "Alfreds Futterkiste GmbH",
        "City": "Berlin",
        "Country": "Germany"
    });

    let response = app
        .request(Method::PUT, "/api/Customer/ALFKI", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["CompanyName"], "Alfreds Futterkiste GmbH");
    // ContactName was omitted from the replacement payload.
    assert!(body["ContactName"].is_null());
}

#[tokio::test]
async fn delete_customer_with_orders_is_blocked() {
    let app = TestApp::new().await;

    // ALFKI owns seeded orders; the no-cascade foreign key protects it.
    let response = app.request(Method::DELETE, "/api/Customer/ALFKI", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn delete_customer_without_orders_succeeds() {
    let app = TestApp::new().await;

    let payload = json!({
        "CustomerId": "BOLID",
        "CompanyName": "Bólido Comidas preparadas"
    });
    let response = app
        .request(Method::POST, "/api/Customer", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.request(Method::DELETE, "/api/Customer/BOLID", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/api/Customer/BOLID", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
