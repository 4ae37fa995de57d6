pub mod item_repository;
pub mod status_history_repository;
pub mod location_repository;
pub mod factory;

pub use item_repository::ItemRepositoryImpl;
pub use status_history_repository::StatusHistoryRepositoryImpl;
pub use location_repository::LocationRepositoryImpl;
pub use factory::{InventoryRepoFactory, InventoryRepositories};
