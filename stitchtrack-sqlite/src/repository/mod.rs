pub mod db_init;
pub mod inventory;

pub use inventory::{InventoryRepoFactory, InventoryRepositories};
