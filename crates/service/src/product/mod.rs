use std::sync::Arc;

use configs::{AppConfig, StoreBackend};

pub mod domain;
pub mod repo;
pub mod service;

pub use domain::{NewProduct, Product, ProductInput, ProductPatch};
pub use repo::{memory::MemoryProductStore, seaorm::SeaOrmProductStore, ProductStore};

/// Construct the store selected by configuration. Nothing is opened until `init`.
pub fn build_store(cfg: &AppConfig) -> Arc<dyn ProductStore> {
    match cfg.store_backend() {
        StoreBackend::Memory if cfg.store.seed_sample => Arc::new(MemoryProductStore::with_sample()),
        StoreBackend::Memory => Arc::new(MemoryProductStore::new()),
        StoreBackend::Sqlite => Arc::new(SeaOrmProductStore::new(&cfg.database)),
    }
}
