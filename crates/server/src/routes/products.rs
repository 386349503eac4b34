use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use service::product::{Product, ProductInput};
use tracing::debug;

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub message: &'static str,
    pub product: Product,
}

/// Non-numeric ids can never match a product.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::NotFound("Product not found".into()))
}

/// Decode a JSON object body. An empty body is an empty object.
fn parse_input(body: &Bytes) -> Result<ProductInput, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ProductInput::default());
    }
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ApiError::Validation(format!("invalid JSON body: {e}")))?;
    if !value.is_object() {
        return Err(ApiError::Validation("request body must be a JSON object".into()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::Validation(format!("invalid JSON body: {e}")))
}

#[utoipa::path(
    get, path = "/api/productos", tag = "products",
    responses(
        (status = 200, description = "All products in insertion order", body = [crate::openapi::ProductDoc]),
        (status = 503, description = "Store not ready", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    state.ensure_ready()?;
    Ok(Json(state.products.list().await?))
}

#[utoipa::path(
    get, path = "/api/productos/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>, ApiError> {
    state.ensure_ready()?;
    let id = parse_id(&id)?;
    Ok(Json(state.products.get(id).await?))
}

#[utoipa::path(
    post, path = "/api/productos", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Missing or malformed fields", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<(StatusCode, Json<Product>), ApiError> {
    state.ensure_ready()?;
    let input = parse_input(&body)?;
    debug!(?input, "product_create_request");
    let product = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put, path = "/api/productos/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Malformed fields", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    state.ensure_ready()?;
    let id = parse_id(&id)?;
    let input = parse_input(&body)?;
    debug!(id, ?input, "product_update_request");
    Ok(Json(state.products.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/productos/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeleteOutputDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<DeleteOutput>, ApiError> {
    state.ensure_ready()?;
    let id = parse_id(&id)?;
    let product = state.products.delete(id).await?;
    Ok(Json(DeleteOutput { message: "Product deleted", product }))
}
