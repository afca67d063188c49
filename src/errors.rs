use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};

/// JSON body returned for every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request")
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Additional error details (validation errors in dev mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::error::DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    #[error("Integrity error: {0}")]
    IntegrityError(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

/// Classifies a raw database error into the service taxonomy.
///
/// Connection-level failures become `StorageUnavailable`, foreign-key
/// violations become `IntegrityError`, everything else stays a
/// `DatabaseError`.
pub fn classify_db_err(err: DbErr) -> ServiceError {
    let msg = err.to_string();
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => ServiceError::StorageUnavailable(msg),
        DbErr::Exec(_) | DbErr::Query(_)
            if msg.contains("FOREIGN KEY constraint failed")
                || msg.contains("violates foreign key constraint") =>
        {
            ServiceError::IntegrityError(msg)
        }
        other => ServiceError::DatabaseError(other),
    }
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ConcurrencyConflict(_) => StatusCode::CONFLICT,
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::DatabaseError(_)
            | Self::IntegrityError(_)
            | Self::InternalError(_)
            | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) | Self::Other(_) => "Database error".to_string(),
            Self::IntegrityError(_) => "Referential integrity violation".to_string(),
            Self::InternalError(_) => "Internal server error".to_string(),
            Self::StorageUnavailable(_) => "Storage unavailable".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let err = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.response_message(),
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(err)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::{body::to_bytes, http::StatusCode};

    #[test]
    fn status_code_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::ValidationError("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::ConcurrencyConflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::IntegrityError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServiceError::StorageUnavailable("x".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn response_message_hides_internal_details() {
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("secret dsn".into())).response_message(),
            "Database error"
        );

        // User-facing errors keep the actual message
        assert_eq!(
            ServiceError::NotFound("Order 42 not found".into()).response_message(),
            "Not found: Order 42 not found"
        );
        assert_eq!(
            ServiceError::ConcurrencyConflict("Product 1 row version is stale".into())
                .response_message(),
            "Concurrency conflict: Product 1 row version is stale"
        );
    }

    #[test]
    fn classify_db_err_detects_foreign_key_violations() {
        let sqlite = DbErr::Exec(sea_orm::RuntimeErr::Internal(
            "FOREIGN KEY constraint failed".into(),
        ));
        assert_matches!(classify_db_err(sqlite), ServiceError::IntegrityError(_));

        let postgres = DbErr::Exec(sea_orm::RuntimeErr::Internal(
            "insert or update on table \"order_detail\" violates foreign key constraint".into(),
        ));
        assert_matches!(classify_db_err(postgres), ServiceError::IntegrityError(_));

        let other = DbErr::Exec(sea_orm::RuntimeErr::Internal("syntax error".into()));
        assert_matches!(classify_db_err(other), ServiceError::DatabaseError(_));
    }

    #[test]
    fn classify_db_err_detects_connection_failures() {
        let err = DbErr::Conn(sea_orm::RuntimeErr::Internal("connection refused".into()));
        assert_matches!(classify_db_err(err), ServiceError::StorageUnavailable(_));
    }

    #[tokio::test]
    async fn error_response_body_shape() {
        let response = ServiceError::NotFound("missing".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.error, "Not Found");
        assert_eq!(payload.message, "Not found: missing");
    }
}
