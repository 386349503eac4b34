use async_trait::async_trait;
use configs::StoreBackend;

use super::domain::{NewProduct, Product, ProductPatch};
use crate::errors::ServiceError;

pub mod memory;
pub mod seaorm;

/// Storage abstraction for products. Both implementations honour the same contract:
/// ids strictly increase and are never reused, `list` is in insertion order,
/// `update` touches only the fields set in the patch.
#[async_trait]
pub trait ProductStore: Send + Sync {
    fn backend(&self) -> StoreBackend;

    /// Prepare the backing storage. Idempotent.
    async fn init(&self) -> Result<(), ServiceError>;

    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get(&self, id: i64) -> Result<Option<Product>, ServiceError>;
    async fn create(&self, input: NewProduct) -> Result<Product, ServiceError>;
    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Option<Product>, ServiceError>;
    async fn delete(&self, id: i64) -> Result<Option<Product>, ServiceError>;
}
