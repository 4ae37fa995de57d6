use crate::executor::Executor;
use crate::utils::{get_heapless_string, get_text_or_empty, TryFromRow};
use sqlx::{sqlite::SqliteRow, Row};
use std::error::Error;
use stitchtrack_db::models::inventory::ItemModel;

pub struct ItemRepositoryImpl {
    pub executor: Executor,
}

impl ItemRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<SqliteRow> for ItemModel {
    fn try_from_row(row: &SqliteRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ItemModel {
            id: get_heapless_string(row, "id")?,
            quantity: row.try_get("quantity")?,
            item_type: row.try_get("item_type")?,
            color: row.try_get("color")?,
            design: row.try_get("design")?,
            customer_name: row.try_get("customer_name")?,
            team: row.try_get("team")?,
            number: row.try_get("number")?,
            size: row.try_get("size")?,
            age_group: row.try_get("age_group")?,
            name_bar: row.try_get("name_bar")?,
            chest_logo: get_text_or_empty(row, "chest_logo")?,
            notes: row.try_get("notes")?,
            date_ordered: row.try_get("date_ordered")?,
            date_invoiced: row.try_get("date_invoiced")?,
            date_received: row.try_get("date_received")?,
            date_delivered: row.try_get("date_delivered")?,
            status: row.try_get("status")?,
            payment_status: row.try_get("payment_status")?,
            needs_remake: row.try_get("needs_remake")?,
            tracking_number: get_text_or_empty(row, "tracking_number")?,
            location: row.try_get("location")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
