use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stitchtrack_api::ItemStatus;

use crate::models::identifiable::Identifiable;

use super::item::ItemId;

/// # Documentation
/// - One immutable record of a fulfillment-status transition.
/// - `old_status` is `None` for the creation event.
/// - Entries are only ever appended, and removed together with their item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryModel {
    /// Sequence id assigned by the store (0 until inserted)
    pub id: i64,
    pub item_id: ItemId,
    pub old_status: Option<ItemStatus>,
    pub new_status: ItemStatus,
    /// Item location at the time of the change
    pub location: Option<String>,
    pub changed_at: DateTime<Utc>,
    pub note: Option<String>,
}

impl StatusHistoryModel {
    /// A not-yet-persisted entry stamped with the current time.
    pub fn new(
        item_id: ItemId,
        old_status: Option<ItemStatus>,
        new_status: ItemStatus,
        location: Option<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            item_id,
            old_status,
            new_status,
            location,
            changed_at: Utc::now(),
            note,
        }
    }

    pub fn is_creation(&self) -> bool {
        self.old_status.is_none()
    }
}

impl Identifiable for StatusHistoryModel {
    type Id = i64;

    fn get_id(&self) -> i64 {
        self.id
    }
}
