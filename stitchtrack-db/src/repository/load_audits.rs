use async_trait::async_trait;
use sqlx::Database;

use crate::models::auditable::Auditable;
use crate::repository::pagination::{Page, PageRequest};

/// Generic repository trait for loading the ledger entries of an entity with pagination
///
/// Entries come back most recent first.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Auditable trait
///
/// # Example
/// ```ignore
/// use stitchtrack_db::repository::pagination::PageRequest;
///
/// let page = history_repo.load_audits(&item_id, PageRequest::new(20, 0)).await?;
/// println!("Page {} of {}", page.page_number(), page.total_pages());
/// ```
#[async_trait]
pub trait LoadAudits<DB: Database, T: Auditable>: Send + Sync {
    /// Load paginated ledger entries for an entity by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Page<T::AuditEntry>)` - A page of entries, newest first
    /// * `Err` - An error if the entries could not be loaded
    async fn load_audits(
        &self,
        id: &T::Id,
        page: PageRequest,
    ) -> Result<Page<T::AuditEntry>, Box<dyn std::error::Error + Send + Sync>>;
}
