use std::sync::Arc;

use arc_swap::ArcSwap;
use configs::Mode;
use service::ProductService;

use crate::errors::ApiError;

/// Lifecycle of the one-time store initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStatus {
    Initializing,
    Ready,
    Failed(String),
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Initializing => "initializing",
            StoreStatus::Ready => "ready",
            StoreStatus::Failed(_) => "failed",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub mode: Mode,
    status: Arc<ArcSwap<StoreStatus>>,
}

impl AppState {
    pub fn new(products: ProductService, mode: Mode) -> Self {
        Self { products, mode, status: Arc::new(ArcSwap::from_pointee(StoreStatus::Initializing)) }
    }

    pub fn store_status(&self) -> Arc<StoreStatus> {
        self.status.load_full()
    }

    pub fn set_store_status(&self, status: StoreStatus) {
        self.status.store(Arc::new(status));
    }

    /// Gate for routes that touch the store.
    pub fn ensure_ready(&self) -> Result<(), ApiError> {
        match &*self.store_status() {
            StoreStatus::Ready => Ok(()),
            StoreStatus::Initializing => Err(ApiError::StoreNotReady("store is still initializing".into())),
            StoreStatus::Failed(msg) => Err(ApiError::StoreNotReady(format!("store initialization failed: {msg}"))),
        }
    }
}
