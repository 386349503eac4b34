use async_trait::async_trait;
use configs::{DatabaseConfig, StoreBackend};
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use tracing::info;

use super::ProductStore;
use crate::errors::ServiceError;
use crate::product::domain::{NewProduct, Product, ProductPatch};

/// SQLite-backed store reached through SeaORM. The connection is opened by `init`;
/// every other call fails with `NotReady` until then.
pub struct SeaOrmProductStore {
    url: String,
    max_connections: u32,
    sqlx_logging: bool,
    db: OnceCell<DatabaseConnection>,
}

impl SeaOrmProductStore {
    pub fn new(cfg: &DatabaseConfig) -> Self {
        Self {
            url: cfg.url.clone(),
            max_connections: cfg.max_connections,
            sqlx_logging: cfg.sqlx_logging,
            db: OnceCell::new(),
        }
    }

    pub fn from_url(url: &str) -> Self {
        Self::new(&DatabaseConfig { url: url.to_string(), ..Default::default() })
    }

    fn db(&self) -> Result<&DatabaseConnection, ServiceError> {
        self.db
            .get()
            .ok_or_else(|| ServiceError::NotReady("database not initialized".into()))
    }
}

#[async_trait]
impl ProductStore for SeaOrmProductStore {
    fn backend(&self) -> StoreBackend { StoreBackend::Sqlite }

    async fn init(&self) -> Result<(), ServiceError> {
        self.db
            .get_or_try_init(|| async {
                let db = models::db::connect(&self.url, self.max_connections, self.sqlx_logging)
                    .await
                    .map_err(|e| ServiceError::Db(e.to_string()))?;
                models::db::migrate(&db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
                info!(url = %self.url, "product table ready");
                Ok::<_, ServiceError>(db)
            })
            .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let rows = models::product::list(self.db()?).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        Ok(models::product::find(self.db()?, id).await?.map(Product::from))
    }

    async fn create(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let m = models::product::create(self.db()?, &input.name, input.price, input.stock).await?;
        Ok(m.into())
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Option<Product>, ServiceError> {
        let m = models::product::update_fields(self.db()?, id, patch.name.as_deref(), patch.price, patch.stock).await?;
        Ok(m.map(Product::from))
    }

    async fn delete(&self, id: i64) -> Result<Option<Product>, ServiceError> {
        Ok(models::product::delete(self.db()?, id).await?.map(Product::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn ready_store() -> Result<SeaOrmProductStore, anyhow::Error> {
        let store = SeaOrmProductStore::from_url("sqlite::memory:");
        store.init().await?;
        Ok(store)
    }

    #[tokio::test]
    async fn calls_before_init_are_not_ready() {
        let store = SeaOrmProductStore::from_url("sqlite::memory:");
        let err = store.list().await.unwrap_err();
        assert!(matches!(err, ServiceError::NotReady(_)));
    }

    #[tokio::test]
    async fn init_is_idempotent() -> Result<(), anyhow::Error> {
        let store = ready_store().await?;
        store.create(NewProduct { name: "A".into(), price: 1.0, stock: 1 }).await?;
        store.init().await?;
        assert_eq!(store.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn init_fails_for_unsupported_url() {
        let store = SeaOrmProductStore::from_url("unsupported://nowhere");
        assert!(store.init().await.is_err());
        assert!(matches!(store.get(1).await.unwrap_err(), ServiceError::NotReady(_)));
    }

    #[tokio::test]
    async fn crud_round_trip_matches_memory_contract() -> Result<(), anyhow::Error> {
        let store = ready_store().await?;
        let a = store.create(NewProduct { name: "A".into(), price: 12.5, stock: 4 }).await?;
        let b = store.create(NewProduct { name: "B".into(), price: 2.0, stock: 1 }).await?;
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.list().await?, vec![a.clone(), b.clone()]);

        let updated = store.update(a.id, ProductPatch { price: Some(13.0), ..Default::default() }).await?.unwrap();
        assert_eq!(updated, Product { id: a.id, name: "A".into(), price: 13.0, stock: 4 });

        assert_eq!(store.delete(b.id).await?, Some(b.clone()));
        assert!(store.get(b.id).await?.is_none());
        let c = store.create(NewProduct { name: "C".into(), price: 3.0, stock: 3 }).await?;
        assert!(c.id > b.id);
        Ok(())
    }
}
