use std::sync::Arc;

use configs::StoreBackend;
use tracing::{debug, info, instrument};

use super::domain::{Product, ProductInput};
use super::repo::ProductStore;
use crate::errors::ServiceError;

/// Product use cases independent of the web framework.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self { Self { store } }

    pub fn backend(&self) -> StoreBackend { self.store.backend() }

    pub async fn init(&self) -> Result<(), ServiceError> { self.store.init().await }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let products = self.store.list().await?;
        debug!(count = products.len(), "list products");
        Ok(products)
    }

    pub async fn get(&self, id: i64) -> Result<Product, ServiceError> {
        self.store.get(id).await?.ok_or(ServiceError::NotFound(id))
    }

    /// Validate a raw payload and store it under the next id.
    ///
    /// # Examples
    /// ```
    /// use service::product::{MemoryProductStore, ProductInput};
    /// use service::ProductService;
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(MemoryProductStore::new()));
    /// let input: ProductInput = serde_json::from_value(serde_json::json!({"name": "Widget", "price": "12.5", "stock": 5})).unwrap();
    /// let product = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(product.id, 1);
    /// assert_eq!(product.price, 12.5);
    /// ```
    #[instrument(skip(self, input), fields(backend = self.store.backend().as_str()))]
    pub async fn create(&self, input: ProductInput) -> Result<Product, ServiceError> {
        let new = input.into_new()?;
        let product = self.store.create(new).await?;
        info!(id = product.id, name = %product.name, "product_created");
        Ok(product)
    }

    /// Merge the supplied fields onto product `id`. An empty payload returns the product unchanged.
    /// An unknown id is reported before any payload error.
    #[instrument(skip(self, input), fields(backend = self.store.backend().as_str()))]
    pub async fn update(&self, id: i64, input: ProductInput) -> Result<Product, ServiceError> {
        let Some(current) = self.store.get(id).await? else {
            return Err(ServiceError::NotFound(id));
        };
        let patch = input.into_patch()?;
        if patch.is_empty() {
            debug!(id, "empty patch, nothing to write");
            return Ok(current);
        }
        let product = self.store.update(id, patch).await?.ok_or(ServiceError::NotFound(id))?;
        info!(id = product.id, "product_updated");
        Ok(product)
    }

    #[instrument(skip(self), fields(backend = self.store.backend().as_str()))]
    pub async fn delete(&self, id: i64) -> Result<Product, ServiceError> {
        let product = self.store.delete(id).await?.ok_or(ServiceError::NotFound(id))?;
        info!(id = product.id, "product_deleted");
        Ok(product)
    }
}
