use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for deleting multiple entities in a batch
///
/// IDs that do not exist are skipped silently.
/// Returns the number of items actually deleted.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait DeleteBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Delete multiple items by their IDs
    ///
    /// # Returns
    /// * `Ok(usize)` - The number of items successfully deleted
    /// * `Err` - An error if a statement could not be executed
    async fn delete_batch(
        &self,
        ids: &[T::Id],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
