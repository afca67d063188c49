use crate::entities::customer::Model as Customer;
use crate::errors::ServiceError;
use crate::services::customers::{
    create_customer as create_customer_service, delete_customer as delete_customer_service,
    get_customer as get_customer_service, list_customers as list_customers_service,
    update_customer as update_customer_service,
};
use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

async fn list_customers(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let customers = list_customers_service(&state.db).await?;
    Ok(Json(customers))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = get_customer_service(&state.db, &id).await?;
    Ok(Json(customer))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(customer_info): Json<Customer>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = create_customer_service(&state.db, customer_info).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(customer_info): Json<Customer>,
) -> Result<impl IntoResponse, ServiceError> {
    if customer_info.customer_id != id {
        return Err(ServiceError::BadRequest(format!(
            "Route id {id} does not match submitted CustomerId {}",
            customer_info.customer_id
        )));
    }

    let updated = update_customer_service(&state.db, &id, customer_info).await?;
    Ok(Json(updated))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    delete_customer_service(&state.db, &id).await?;
    Ok(StatusCode::OK)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}
