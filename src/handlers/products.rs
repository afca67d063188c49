use crate::entities::product::Model as Product;
use crate::errors::ServiceError;
use crate::services::products::{
    create_product as create_product_service, delete_product as delete_product_service,
    get_product as get_product_service, list_products as list_products_service,
    update_product as update_product_service,
};
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let products = list_products_service(&state.db).await?;
    Ok(Json(products))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = get_product_service(&state.db, id).await?;
    Ok(Json(product))
}

async fn create_product(
    State(state): State<AppState>,
    Json(product_info): Json<Product>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = create_product_service(&state.db, product_info).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT carries the RowVersion concurrency token; a stale token is rejected
/// with 409 and the stored row is left unmodified.
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(product_info): Json<Product>,
) -> Result<impl IntoResponse, ServiceError> {
    if product_info.product_id != id {
        return Err(ServiceError::BadRequest(format!(
            "Route id {id} does not match submitted ProductId {}",
            product_info.product_id
        )));
    }

    let updated = update_product_service(&state.db, id, product_info).await?;
    Ok(Json(updated))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    delete_product_service(&state.db, id).await?;
    Ok(StatusCode::OK)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}
