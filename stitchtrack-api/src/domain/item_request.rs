use serde::{Deserialize, Serialize};
use validator::Validate;

use super::status::{AgeGroup, ItemStatus, PaymentStatus};

/// Payload for the single-entry form and for one ingestion row.
///
/// Absent `quantity`, `status` and `payment_status` fall back to `1`,
/// `ordered` and `unpaid`. `age_group` overrides the age derived from the
/// size prefix when supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: Option<i64>,
    pub item_type: String,
    pub color: String,
    pub design: String,
    #[validate(length(min = 1, message = "customer name is required"))]
    pub customer_name: String,
    pub team: String,
    pub number: String,
    pub size: String,
    pub age_group: Option<AgeGroup>,
    pub name_bar: String,
    pub chest_logo: String,
    pub notes: String,
    pub date_ordered: Option<String>,
    pub date_invoiced: Option<String>,
    pub date_received: Option<String>,
    pub date_delivered: Option<String>,
    pub status: Option<ItemStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub needs_remake: bool,
    pub tracking_number: String,
    pub location: Option<String>,
}

impl CreateItemRequest {
    /// Minimal request: everything but the customer left at its default.
    pub fn for_customer(customer_name: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            ..Default::default()
        }
    }
}

/// Full-edit payload. Every mutable field is overwritten, there is no
/// partial-update semantics on this path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
    pub item_type: String,
    pub color: String,
    pub design: String,
    #[validate(length(min = 1, message = "customer name is required"))]
    pub customer_name: String,
    pub team: String,
    pub number: String,
    pub size: String,
    pub age_group: Option<AgeGroup>,
    pub name_bar: String,
    pub chest_logo: String,
    pub notes: String,
    pub date_ordered: Option<String>,
    pub date_invoiced: Option<String>,
    pub date_received: Option<String>,
    pub date_delivered: Option<String>,
    pub status: ItemStatus,
    pub payment_status: PaymentStatus,
    pub needs_remake: bool,
    pub tracking_number: String,
    pub location: Option<String>,
}

/// Partial field set applied identically to every id of a bulk update.
///
/// `Some` overwrites unconditionally, `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdateFields {
    pub status: Option<ItemStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub tracking_number: Option<String>,
    pub date_delivered: Option<String>,
}

impl BulkUpdateFields {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.payment_status.is_none()
            && self.tracking_number.is_none()
            && self.date_delivered.is_none()
    }
}
