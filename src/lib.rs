//! Northwind API Library
//!
//! A sample CRUD API over the NorthwindSlim dataset. Orders are read and
//! written as whole object graphs; each node of a submitted graph carries an
//! explicit change operation that the order service reconciles against the
//! store in one transaction.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod changes;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod seed;
pub mod services;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use services::orders::OrderService;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub order_service: OrderService,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let order_service = OrderService::new(db.clone());
        Self {
            db,
            config,
            order_service,
        }
    }
}

/// Liveness probe including a database ping.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match db::check_connection(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "up",
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "down",
                "message": e.response_message(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        ),
    }
}

/// Assembles the full application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "northwind-api up" }))
        .route("/health", get(health))
        .nest("/api/Order", handlers::orders::routes())
        .nest("/api/Customer", handlers::customers::routes())
        .nest("/api/Product", handlers::products::routes())
        .nest("/api/Category", handlers::categories::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
