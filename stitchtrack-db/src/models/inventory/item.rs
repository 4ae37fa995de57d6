use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use stitchtrack_api::{AgeGroup, ItemStatus, PaymentStatus, UpdateItemRequest};

use crate::models::auditable::Auditable;
use crate::models::identifiable::Identifiable;

use super::status_history::StatusHistoryModel;

/// Opaque, human-shareable item key printed on labels.
pub type ItemId = HeaplessString<16>;

/// # Documentation
/// - One physical inventory unit, or a batch of identical units.
/// - `id` is generated on insert and never changes.
/// - `created_at` is written once; `updated_at` advances on every mutation.
/// - `location` is a weak reference to a location by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemModel {
    pub id: ItemId,
    pub quantity: i64,
    pub item_type: String,
    pub color: String,
    pub design: String,
    pub customer_name: String,
    pub team: String,
    pub number: String,
    /// Size with the age prefix already stripped
    pub size: String,
    pub age_group: AgeGroup,
    pub name_bar: String,
    pub chest_logo: String,
    pub notes: String,
    pub date_ordered: Option<String>,
    pub date_invoiced: Option<String>,
    pub date_received: Option<String>,
    pub date_delivered: Option<String>,
    pub status: ItemStatus,
    pub payment_status: PaymentStatus,
    /// Orthogonal to `status`; may be set or cleared at any stage
    pub needs_remake: bool,
    pub tracking_number: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemModel {
    /// The item's current values as a full-edit payload.
    pub fn to_update_request(&self) -> UpdateItemRequest {
        UpdateItemRequest {
            quantity: self.quantity,
            item_type: self.item_type.clone(),
            color: self.color.clone(),
            design: self.design.clone(),
            customer_name: self.customer_name.clone(),
            team: self.team.clone(),
            number: self.number.clone(),
            size: self.prefixed_size(),
            age_group: Some(self.age_group),
            name_bar: self.name_bar.clone(),
            chest_logo: self.chest_logo.clone(),
            notes: self.notes.clone(),
            date_ordered: self.date_ordered.clone(),
            date_invoiced: self.date_invoiced.clone(),
            date_received: self.date_received.clone(),
            date_delivered: self.date_delivered.clone(),
            status: self.status,
            payment_status: self.payment_status,
            needs_remake: self.needs_remake,
            tracking_number: self.tracking_number.clone(),
            location: self.location.clone(),
        }
    }

    /// Size as typed on a form or spreadsheet, age prefix included.
    pub fn prefixed_size(&self) -> String {
        format!("{}{}", self.age_group.size_prefix(), self.size)
    }
}

impl Identifiable for ItemModel {
    type Id = ItemId;

    fn get_id(&self) -> ItemId {
        self.id.clone()
    }
}

impl Auditable for ItemModel {
    type AuditEntry = StatusHistoryModel;
}
