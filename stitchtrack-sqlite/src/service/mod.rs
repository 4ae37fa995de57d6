//! Orchestration over the repositories. Every public entry point opens
//! exactly one session on the [`Store`](crate::sqlite_store::Store) and
//! commits it only when all of its writes succeeded.

pub mod columns;
pub mod ingestion;
pub mod item_query;
pub mod lifecycle;
pub mod location_registry;

pub use ingestion::{ImportSummary, IngestionPipeline};
pub use item_query::ItemQueryService;
pub use lifecycle::LifecycleController;
pub use location_registry::LocationRegistry;

use std::collections::HashSet;

use stitchtrack_api::{InventoryError, InventoryResult};
use stitchtrack_db::models::inventory::ItemId;
use stitchtrack_db::utils::parse_item_id;
use tracing::warn;

use crate::executor::UnitOfWork;

/// Commits the session on success and rolls it back otherwise.
pub(crate) async fn finish<T>(session: UnitOfWork, result: InventoryResult<T>) -> InventoryResult<T> {
    match result {
        Ok(value) => {
            session.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = session.rollback().await {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}

/// An id that cannot be stored cannot exist either.
pub(crate) fn item_id_or_not_found(raw: &str) -> InventoryResult<ItemId> {
    parse_item_id(raw).ok_or_else(|| InventoryError::NotFound(format!("item {}", raw.trim())))
}

/// Parses ids for bulk operations; unusable ids are dropped like missing ones.
///
/// Repeated ids are kept once, in first-seen order.
pub(crate) fn parse_item_ids<S: AsRef<str>>(raw_ids: &[S]) -> Vec<ItemId> {
    let mut seen = HashSet::new();
    raw_ids
        .iter()
        .filter_map(|raw| parse_item_id(raw.as_ref()))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
