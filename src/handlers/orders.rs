use crate::changes::Tracked;
use crate::errors::ServiceError;
use crate::services::orders::OrderGraph;
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

/// GET /api/Order — every order as a full graph.
async fn list_orders(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.order_service.list_orders().await?;
    Ok(Json(wrap_all(orders)))
}

/// GET /api/Order/{key} — an alphabetic key filters by customer, a numeric
/// key fetches a single order.
async fn get_order_by_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ServiceError> {
    if let Ok(id) = key.parse::<i32>() {
        let order = state.order_service.get_order(id).await?;
        return Ok(Json(Tracked::noop(order)).into_response());
    }

    if key.chars().all(|c| c.is_ascii_alphabetic()) {
        let orders = state.order_service.list_orders_for_customer(&key).await?;
        return Ok(Json(wrap_all(orders)).into_response());
    }

    Err(ServiceError::BadRequest(format!(
        "'{key}' is neither an order id nor a customer id"
    )))
}

/// POST /api/Order — root insert of the submitted graph.
async fn create_order(
    State(state): State<AppState>,
    Json(graph): Json<OrderGraph>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.order_service.create_order(graph).await?;
    let location = format!("/api/Order/{}", created.order_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(Tracked::noop(created)),
    ))
}

/// PUT /api/Order — root update keyed by the submitted OrderId.
async fn update_order(
    State(state): State<AppState>,
    Json(graph): Json<OrderGraph>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.order_service.update_order(graph).await?;
    Ok(Json(Tracked::noop(updated)))
}

/// PUT /api/Order/{id} — as above, but the route id must match the payload.
async fn update_order_by_id(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(graph): Json<OrderGraph>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_order_id(&key)?;
    if graph.order_id != id {
        return Err(ServiceError::BadRequest(format!(
            "Route id {id} does not match submitted OrderId {}",
            graph.order_id
        )));
    }

    let updated = state.order_service.update_order(graph).await?;
    Ok(Json(Tracked::noop(updated)))
}

/// DELETE /api/Order/{id} — root delete, lines first. Returns no body.
async fn delete_order(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let id = parse_order_id(&key)?;
    state.order_service.delete_order(id).await?;
    Ok(StatusCode::OK)
}

fn parse_order_id(key: &str) -> Result<i32, ServiceError> {
    key.parse::<i32>()
        .map_err(|_| ServiceError::BadRequest(format!("'{key}' is not a valid order id")))
}

fn wrap_all(orders: Vec<OrderGraph>) -> Vec<Tracked<OrderGraph>> {
    orders.into_iter().map(Tracked::noop).collect()
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order).put(update_order))
        .route(
            "/:key",
            get(get_order_by_key)
                .put(update_order_by_id)
                .delete(delete_order),
        )
}
