//! Startup wiring: opens the store once and builds every service against it.

use std::sync::Arc;

use tracing::info;

use crate::config::StoreConfig;
use crate::repository::db_init::init_database;
use crate::repository::InventoryRepoFactory;
use crate::service::{IngestionPipeline, ItemQueryService, LifecycleController, LocationRegistry};
use crate::sqlite_store::Store;

/// Connects, brings the schema up to date and seeds the starter locations.
///
/// # Example
///
/// ```rust,no_run
/// use stitchtrack_sqlite::bootstrap::{open_store, Services};
/// use stitchtrack_sqlite::config::StoreConfig;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// let store = open_store(StoreConfig::from_env()?).await?;
/// let services = Services::new(store.clone());
/// let _counts = services.queries.status_counts().await?;
/// store.close().await;
/// # Ok(())
/// # }
/// ```
pub async fn open_store(config: StoreConfig) -> Result<Arc<Store>, sqlx::Error> {
    let seed_locations = config.seed_locations.clone();
    let store = Store::connect(config).await?;
    init_database(store.pool(), &seed_locations).await?;
    info!("item store ready");
    Ok(Arc::new(store))
}

/// Every service of the inventory core, sharing one store.
pub struct Services {
    pub lifecycle: Arc<LifecycleController>,
    pub queries: ItemQueryService,
    pub locations: LocationRegistry,
    pub ingestion: IngestionPipeline,
}

impl Services {
    pub fn new(store: Arc<Store>) -> Self {
        let repo_factory = InventoryRepoFactory::new();
        let lifecycle = Arc::new(LifecycleController::new(store.clone(), repo_factory.clone()));
        let max_reported_errors = store.config().max_reported_import_errors;

        Self {
            lifecycle: lifecycle.clone(),
            queries: ItemQueryService::new(store.clone(), repo_factory.clone()),
            locations: LocationRegistry::new(store, repo_factory),
            ingestion: IngestionPipeline::new(lifecycle, max_reported_errors),
        }
    }
}
