use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::errors::StartupError;
use crate::routes;
use crate::state::{AppState, StoreStatus};
use service::ProductService;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the configured store into fresh state. The store is not opened yet.
pub fn build_state(cfg: &AppConfig) -> AppState {
    AppState::new(ProductService::new(service::build_store(cfg)), cfg.mode)
}

/// One-time store setup. Records the outcome in `state` either way.
pub async fn initialize_store(state: &AppState) -> Result<(), StartupError> {
    let backend = state.products.backend().as_str();
    match state.products.init().await {
        Ok(()) => {
            state.set_store_status(StoreStatus::Ready);
            info!(store = backend, "store ready");
            Ok(())
        }
        Err(e) => {
            let msg = e.to_string();
            state.set_store_status(StoreStatus::Failed(msg.clone()));
            Err(StartupError::StoreInit(msg))
        }
    }
}

/// Run store setup in the background; a failure degrades the service instead of stopping it.
pub fn spawn_store_init(state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = initialize_store(&state).await {
            error!(store = state.products.backend().as_str(), error = %e, "serving health checks only");
        }
    })
}

pub fn app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Bind, start store setup and serve with an already-loaded configuration.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg);
    spawn_store_init(state.clone());

    let host = cfg.bind_host();
    let listener = TcpListener::bind((host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        mode = cfg.mode.as_str(),
        store = cfg.store_backend().as_str(),
        "starting productos api"
    );
    axum::serve(listener, app(state)).await?;
    Ok(())
}
