//! Test helper module for isolated in-memory stores
//!
//! Every context owns a private in-memory database with the schema and the
//! starter locations already in place, so tests never see each other's rows.

use std::sync::Arc;

use crate::bootstrap::{open_store, Services};
use crate::config::StoreConfig;
use crate::executor::UnitOfWork;
use crate::repository::{InventoryRepoFactory, InventoryRepositories};
use crate::sqlite_store::Store;

/// Repository-level context: one open write session.
///
/// The session is rolled back when the context is dropped.
pub struct TestContext {
    pub inventory_repos: InventoryRepositories,
    // Field order matters: repositories go before the session and store
    _session: UnitOfWork,
    _store: Arc<Store>,
}

impl TestContext {
    /// Get the inventory repositories from the context
    pub fn inventory_repos(&self) -> &InventoryRepositories {
        &self.inventory_repos
    }
}

/// Setup a repository test context on a fresh in-memory store
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let ctx = setup_test_context().await?;
///     let item_repo = &ctx.inventory_repos().item_repository;
///
///     // Perform test operations...
///
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let store = open_store(StoreConfig::in_memory()).await?;
    let session = store.begin_write().await?;
    let inventory_repos = InventoryRepoFactory::new().build_all_repos(&session);

    Ok(TestContext {
        inventory_repos,
        _session: session,
        _store: store,
    })
}

/// Service-level context; each service call commits its own session.
pub struct ServiceTestContext {
    pub services: Services,
    pub store: Arc<Store>,
}

pub async fn setup_service_context() -> Result<ServiceTestContext, Box<dyn std::error::Error + Send + Sync>> {
    setup_service_context_with(StoreConfig::in_memory()).await
}

/// Like [`setup_service_context`] with a custom configuration. The database
/// URL must point at an in-memory store.
pub async fn setup_service_context_with(
    config: StoreConfig,
) -> Result<ServiceTestContext, Box<dyn std::error::Error + Send + Sync>> {
    let store = open_store(config).await?;
    Ok(ServiceTestContext {
        services: Services::new(store.clone()),
        store,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::inventory::item_repository::test_utils::create_test_item;
    use stitchtrack_db::repository::create_batch::CreateBatch;
    use stitchtrack_db::repository::load::Load;

    #[tokio::test]
    async fn test_contexts_are_isolated() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let first = setup_test_context().await?;
        let saved = first
            .inventory_repos()
            .item_repository
            .create_batch(vec![create_test_item("Isolated")])
            .await?;

        let second = setup_test_context().await?;
        let loaded = second.inventory_repos().item_repository.load(&saved[0].id).await?;
        assert!(loaded.is_none());

        Ok(())
    }
}
