use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::StoreConfig;
use crate::executor::UnitOfWork;

/// Process-wide handle on the persistent store.
///
/// Opened once at startup and passed explicitly to every service. Writers
/// are serialized through a single lock so an item write and its history
/// entry can never interleave with another request's.
pub struct Store {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
    config: StoreConfig,
}

impl Store {
    pub async fn connect(config: StoreConfig) -> Result<Self, sqlx::Error> {
        let mut options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        if !config.is_in_memory() {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(5));
        }

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.effective_max_connections())
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));
        if config.is_in_memory() {
            // The database disappears with its last connection
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        info!(
            database_url = %config.database_url,
            max_connections = config.effective_max_connections(),
            "opened item store"
        );

        Ok(Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
            config,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Opens a transaction holding the store write lock.
    pub async fn begin_write(&self) -> Result<UnitOfWork, sqlx::Error> {
        let guard = self.write_lock.clone().lock_owned().await;
        let tx = self.pool.begin().await?;
        Ok(UnitOfWork::new(tx, Some(guard)))
    }

    /// Opens a transaction for queries; does not block other readers.
    pub async fn begin_read(&self) -> Result<UnitOfWork, sqlx::Error> {
        let tx = self.pool.begin().await?;
        Ok(UnitOfWork::new(tx, None))
    }

    /// Lookup URL handed to the label renderer: `<base>/items/<id>`.
    pub fn public_url(&self, item_id: &str) -> String {
        format!(
            "{}/items/{}",
            self.config.public_base_url.trim_end_matches('/'),
            item_id
        )
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("closed item store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_public_url_joins_base() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let config = StoreConfig {
            public_base_url: "https://shop.example/".to_string(),
            ..StoreConfig::in_memory()
        };
        let store = Store::connect(config).await?;
        assert_eq!(store.public_url("AB12CD34"), "https://shop.example/items/AB12CD34");
        store.close().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_write_sessions_are_serialized() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let store = Store::connect(StoreConfig::in_memory()).await?;
        let first = store.begin_write().await?;
        assert!(first.is_writer());
        assert!(store.write_lock.try_lock().is_err());
        first.rollback().await?;
        assert!(store.write_lock.try_lock().is_ok());
        Ok(())
    }
}
