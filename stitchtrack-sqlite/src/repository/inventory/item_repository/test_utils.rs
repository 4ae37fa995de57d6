use chrono::Utc;
use stitchtrack_api::{AgeGroup, ItemStatus, PaymentStatus};
use stitchtrack_db::models::inventory::{ItemId, ItemModel};

/// Unsaved item; the repository assigns the id on insert.
pub fn create_test_item(customer_name: &str) -> ItemModel {
    let now = Utc::now();
    ItemModel {
        id: ItemId::new(),
        quantity: 1,
        item_type: "Jersey".to_string(),
        color: "Navy".to_string(),
        design: "Home".to_string(),
        customer_name: customer_name.to_string(),
        team: "Falcons".to_string(),
        number: "7".to_string(),
        size: "L".to_string(),
        age_group: AgeGroup::Adult,
        name_bar: String::new(),
        chest_logo: String::new(),
        notes: String::new(),
        date_ordered: Some("2025-01-05".to_string()),
        date_invoiced: None,
        date_received: None,
        date_delivered: None,
        status: ItemStatus::Ordered,
        payment_status: PaymentStatus::Unpaid,
        needs_remake: false,
        tracking_number: String::new(),
        location: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn create_test_item_with(
    customer_name: &str,
    status: ItemStatus,
    location: Option<&str>,
) -> ItemModel {
    ItemModel {
        status,
        location: location.map(str::to_string),
        ..create_test_item(customer_name)
    }
}

pub fn item_id(raw: &str) -> ItemId {
    ItemId::try_from(raw).unwrap()
}
