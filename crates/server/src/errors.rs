use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by route handlers, each with a fixed status and JSON shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    StoreNotReady(String),
    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => ApiError::NotFound("Product not found".into()),
            ServiceError::NotReady(msg) => ApiError::StoreNotReady(msg),
            ServiceError::Validation(msg) => ApiError::Validation(msg),
            other if other.is_client_error() => ApiError::Validation(other.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": msg}))).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, Json(serde_json::json!({"message": msg}))).into_response(),
            ApiError::StoreNotReady(msg) => {
                warn!(error = %msg, "store not ready");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({"error": "Store Not Ready", "message": msg})),
                )
                    .into_response()
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Internal Server Error", "message": msg})),
                )
                    .into_response()
            }
        }
    }
}

/// Turn a handler panic into the same 500 body as any other fault.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(detail).into_response()
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("store initialization failed: {0}")]
    StoreInit(String),
}
