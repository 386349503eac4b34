use std::time::Duration;

use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// True for SQLite URLs that live only inside the process.
pub fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Effectively unbounded; an in-memory database is dropped with its last connection.
const MEMORY_CONN_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Pool settings for `url`. In-memory SQLite is pinned to one long-lived connection so every request sees the same database.
pub fn connect_options(url: &str, max_connections: u32, sqlx_logging: bool) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url.to_string());
    if is_memory_url(url) {
        opts.max_connections(1)
            .min_connections(1)
            .max_lifetime(MEMORY_CONN_LIFETIME)
            .idle_timeout(MEMORY_CONN_LIFETIME);
    } else {
        opts.max_connections(max_connections.max(1));
    }
    opts.sqlx_logging(sqlx_logging);
    opts
}

pub async fn connect(url: &str, max_connections: u32, sqlx_logging: bool) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(connect_options(url, max_connections, sqlx_logging)).await?;
    info!(url = %url, "database connected");
    Ok(db)
}

/// Create the schema if missing. Safe to call repeatedly.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    migration::Migrator::up(db, None).await
}
