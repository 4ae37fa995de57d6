use crate::executor::Executor;
use crate::utils::{get_heapless_string, TryFromRow};
use sqlx::{sqlite::SqliteRow, Row};
use std::error::Error;
use stitchtrack_db::models::inventory::StatusHistoryModel;

/// Append-only ledger of status transitions. Entries are never updated;
/// they disappear only together with their item.
pub struct StatusHistoryRepositoryImpl {
    pub executor: Executor,
}

impl StatusHistoryRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<SqliteRow> for StatusHistoryModel {
    fn try_from_row(row: &SqliteRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(StatusHistoryModel {
            id: row.try_get("id")?,
            item_id: get_heapless_string(row, "item_id")?,
            old_status: row.try_get("old_status")?,
            new_status: row.try_get("new_status")?,
            location: row.try_get("location")?,
            changed_at: row.try_get("changed_at")?,
            note: row.try_get("note")?,
        })
    }
}
