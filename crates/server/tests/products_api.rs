use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use configs::Mode;
use serde_json::{json, Value};
use server::startup::{app, initialize_store};
use server::state::AppState;
use service::product::{MemoryProductStore, ProductStore, SeaOrmProductStore};
use service::ProductService;
use tower::ServiceExt;

async fn ready_app(store: Arc<dyn ProductStore>) -> anyhow::Result<Router> {
    let state = AppState::new(ProductService::new(store), Mode::Development);
    initialize_store(&state).await?;
    Ok(app(state))
}

async fn backends() -> anyhow::Result<Vec<Router>> {
    Ok(vec![
        ready_app(Arc::new(MemoryProductStore::new())).await?,
        ready_app(Arc::new(SeaOrmProductStore::from_url("sqlite::memory:"))).await?,
    ])
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body)?).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

#[tokio::test]
async fn widget_scenario() -> anyhow::Result<()> {
    for app in backends().await? {
        let (status, created) =
            call(&app, Method::POST, "/api/productos", Some(json!({"name": "Widget", "price": 9.99, "stock": 5}))).await?;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created, json!({"id": 1, "name": "Widget", "price": 9.99, "stock": 5}));

        let (status, fetched) = call(&app, Method::GET, "/api/productos/1", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, updated) = call(&app, Method::PUT, "/api/productos/1", Some(json!({"stock": 3}))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated, json!({"id": 1, "name": "Widget", "price": 9.99, "stock": 3}));

        let (status, deleted) = call(&app, Method::DELETE, "/api/productos/1", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["product"], updated);
        assert!(deleted["message"].is_string());

        let (status, missing) = call(&app, Method::GET, "/api/productos/1", None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(missing, json!({"message": "Product not found"}));
    }
    Ok(())
}

#[tokio::test]
async fn list_keeps_insertion_order_and_coerces_price() -> anyhow::Result<()> {
    for app in backends().await? {
        call(&app, Method::POST, "/api/productos", Some(json!({"name": "A", "price": "12.5", "stock": 1}))).await?;
        call(&app, Method::POST, "/api/productos", Some(json!({"name": "B", "price": 3, "stock": "2"}))).await?;
        let (status, list) = call(&app, Method::GET, "/api/productos", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            list,
            json!([
                {"id": 1, "name": "A", "price": 12.5, "stock": 1},
                {"id": 2, "name": "B", "price": 3.0, "stock": 2}
            ])
        );
    }
    Ok(())
}

#[tokio::test]
async fn empty_update_returns_product_unchanged() -> anyhow::Result<()> {
    for app in backends().await? {
        let (_, created) =
            call(&app, Method::POST, "/api/productos", Some(json!({"name": "A", "price": 1, "stock": 1}))).await?;
        let (status, same) = call(&app, Method::PUT, "/api/productos/1", Some(json!({}))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(same, created);
    }
    Ok(())
}

#[tokio::test]
async fn bad_payloads_are_400_and_store_nothing() -> anyhow::Result<()> {
    for app in backends().await? {
        for body in [json!({"name": "A"}), json!({"name": "A", "price": "cheap", "stock": 1}), json!([1, 2])] {
            let (status, err) = call(&app, Method::POST, "/api/productos", Some(body)).await?;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(err["error"].is_string());
        }
        let (_, list) = call(&app, Method::GET, "/api/productos", None).await?;
        assert_eq!(list, json!([]));
    }
    Ok(())
}

#[tokio::test]
async fn malformed_update_on_existing_id_is_400() -> anyhow::Result<()> {
    for app in backends().await? {
        let (_, created) =
            call(&app, Method::POST, "/api/productos", Some(json!({"name": "A", "price": 1, "stock": 1}))).await?;
        let (status, err) = call(&app, Method::PUT, "/api/productos/1", Some(json!({"price": "cheap"}))).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(err["error"].is_string());
        let (_, unchanged) = call(&app, Method::GET, "/api/productos/1", None).await?;
        assert_eq!(unchanged, created);
    }
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_404() -> anyhow::Result<()> {
    for app in backends().await? {
        for (method, uri) in [
            (Method::GET, "/api/productos/42"),
            (Method::DELETE, "/api/productos/42"),
            (Method::GET, "/api/productos/abc"),
        ] {
            let (status, body) = call(&app, method, uri, None).await?;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(body["message"].is_string());
        }
        let (status, _) = call(&app, Method::PUT, "/api/productos/42", Some(json!({"price": "cheap"}))).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    Ok(())
}

#[tokio::test]
async fn health_banner_and_fallback() -> anyhow::Result<()> {
    let app = ready_app(Arc::new(MemoryProductStore::with_sample())).await?;

    let (status, health) = call(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "OK");
    assert!(health["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));

    let (status, banner) = call(&app, Method::GET, "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(banner["environment"], "development");
    assert_eq!(banner["store"], "memory");
    assert_eq!(banner["totalProducts"], 1);

    let (status, body) = call(&app, Method::GET, "/nope", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");

    let (status, doc) = call(&app, Method::GET, "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/productos"].is_object());
    assert!(doc["paths"]["/debug"].is_object());
    Ok(())
}

#[tokio::test]
async fn failed_store_degrades_to_health_only() -> anyhow::Result<()> {
    let state = AppState::new(
        ProductService::new(Arc::new(SeaOrmProductStore::from_url("unsupported://nowhere"))),
        Mode::Production,
    );
    assert!(initialize_store(&state).await.is_err());
    let app = app(state);

    let (status, _) = call(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, Method::GET, "/api/productos", None).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Store Not Ready");
    assert!(body["message"].is_string());

    let (status, debug) = call(&app, Method::GET, "/debug", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(debug["status"], "failed");
    assert_eq!(debug["error"], "Failed to initialize store");

    let (_, banner) = call(&app, Method::GET, "/", None).await?;
    assert!(banner.get("totalProducts").is_none());
    Ok(())
}

#[tokio::test]
async fn store_routes_wait_for_init() -> anyhow::Result<()> {
    let state = AppState::new(ProductService::new(Arc::new(MemoryProductStore::new())), Mode::Development);
    let app = app(state);
    let (status, _) = call(&app, Method::GET, "/api/productos", None).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}
