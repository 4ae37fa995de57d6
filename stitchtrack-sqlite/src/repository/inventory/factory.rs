use std::sync::Arc;

use crate::executor::UnitOfWork;

use super::{ItemRepositoryImpl, LocationRepositoryImpl, StatusHistoryRepositoryImpl};

/// Factory for the inventory repositories of one unit of work
pub struct InventoryRepoFactory {}

impl InventoryRepoFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    pub fn build_item_repo(&self, session: &UnitOfWork) -> Arc<ItemRepositoryImpl> {
        Arc::new(ItemRepositoryImpl::new(session.executor().clone()))
    }

    pub fn build_status_history_repo(&self, session: &UnitOfWork) -> Arc<StatusHistoryRepositoryImpl> {
        Arc::new(StatusHistoryRepositoryImpl::new(session.executor().clone()))
    }

    pub fn build_location_repo(&self, session: &UnitOfWork) -> Arc<LocationRepositoryImpl> {
        Arc::new(LocationRepositoryImpl::new(session.executor().clone()))
    }

    /// Build all inventory repositories sharing the session's transaction
    pub fn build_all_repos(&self, session: &UnitOfWork) -> InventoryRepositories {
        InventoryRepositories {
            item_repository: self.build_item_repo(session),
            status_history_repository: self.build_status_history_repo(session),
            location_repository: self.build_location_repo(session),
        }
    }
}

/// Container for all inventory repositories
pub struct InventoryRepositories {
    pub item_repository: Arc<ItemRepositoryImpl>,
    pub status_history_repository: Arc<StatusHistoryRepositoryImpl>,
    pub location_repository: Arc<LocationRepositoryImpl>,
}
