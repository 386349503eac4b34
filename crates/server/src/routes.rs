use axum::{
    extract::State,
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::{types::Health, utils::time::now_iso};

use crate::errors::handle_panic;
use crate::openapi::ApiDoc;
use crate::state::{AppState, StoreStatus};

pub mod products;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub message: &'static str,
    pub timestamp: String,
    pub environment: &'static str,
    pub store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_products: Option<usize>,
}

#[utoipa::path(
    get, path = "/", tag = "health",
    responses((status = 200, description = "Service banner", body = crate::openapi::BannerDoc))
)]
pub async fn root(State(state): State<AppState>) -> Json<Banner> {
    let total_products = match state.ensure_ready() {
        Ok(()) => state.products.list().await.ok().map(|p| p.len()),
        Err(_) => None,
    };
    Json(Banner {
        message: "Backend running",
        timestamp: now_iso(),
        environment: state.mode.as_str(),
        store: state.products.backend().as_str(),
        total_products,
    })
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Liveness", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Store diagnostics; carries the init error when the store failed to come up.
#[utoipa::path(
    get, path = "/debug", tag = "health",
    responses((status = 200, description = "Store backend and init status", body = crate::openapi::DebugDoc))
)]
pub async fn debug(State(state): State<AppState>) -> Json<serde_json::Value> {
    let status = state.store_status();
    let mut body = serde_json::json!({
        "store": state.products.backend().as_str(),
        "status": status.as_str(),
        "environment": state.mode.as_str(),
    });
    if let StoreStatus::Failed(msg) = &*status {
        body["error"] = "Failed to initialize store".into();
        body["message"] = msg.clone().into();
    }
    Json(body)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found(uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "Not Found", "message": format!("no route for {uri}")})),
    )
}

/// Build the full application router with CORS, panic catching and request tracing.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/debug", get(debug))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/productos", get(products::list).post(products::create))
        .route(
            "/api/productos/:id",
            get(products::get).put(products::update).delete(products::delete),
        )
        .fallback(not_found)
        .with_state(state);
    with_layers(router, cors)
}

fn with_layers(router: Router, cors: CorsLayer) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
