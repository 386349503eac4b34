use async_trait::async_trait;
use configs::StoreBackend;
use tokio::sync::RwLock;

use super::ProductStore;
use crate::errors::ServiceError;
use crate::product::domain::{NewProduct, Product, ProductPatch};

struct Inner {
    products: Vec<Product>,
    next_id: i64,
}

/// Process-local store. Contents and the id counter are lost on restart.
pub struct MemoryProductStore {
    inner: RwLock<Inner>,
}

impl Default for MemoryProductStore {
    fn default() -> Self { Self::new() }
}

impl MemoryProductStore {
    pub fn new() -> Self { Self::with_products(Vec::new()) }

    /// Start from existing records; the next id follows the highest one.
    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self { inner: RwLock::new(Inner { products, next_id }) }
    }

    /// One sample record, next id 2.
    pub fn with_sample() -> Self {
        Self::with_products(vec![Product {
            id: 1,
            name: "Sample product".into(),
            price: 29.99,
            stock: 10,
        }])
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    fn backend(&self) -> StoreBackend { StoreBackend::Memory }

    async fn init(&self) -> Result<(), ServiceError> { Ok(()) }

    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.inner.read().await.products.clone())
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        Ok(self.inner.read().await.products.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let mut inner = self.inner.write().await;
        let product = Product { id: inner.next_id, name: input.name, price: input.price, stock: input.stock };
        inner.next_id += 1;
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Option<Product>, ServiceError> {
        let mut inner = self.inner.write().await;
        let Some(product) = inner.products.iter_mut().find(|p| p.id == id) else { return Ok(None) };
        patch.apply(product);
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        let mut inner = self.inner.write().await;
        let Some(idx) = inner.products.iter().position(|p| p.id == id) else { return Ok(None) };
        Ok(Some(inner.products.remove(idx)))
    }
}
