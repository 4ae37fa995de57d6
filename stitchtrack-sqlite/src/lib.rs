pub mod bootstrap;
pub mod config;
pub mod executor;
pub mod repository;
pub mod service;
pub mod sqlite_store;
pub mod utils;

pub use bootstrap::{open_store, Services};
pub use config::{BulkHistoryPolicy, StoreConfig};
pub use repository::{InventoryRepoFactory, InventoryRepositories};
pub use sqlite_store::Store;

#[cfg(test)]
pub mod test_helper;
