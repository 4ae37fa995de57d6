use async_trait::async_trait;
use sqlx::{Sqlite, SqliteConnection};
use std::error::Error;
use stitchtrack_api::InventoryError;
use stitchtrack_db::models::inventory::{ItemId, ItemModel};
use stitchtrack_db::repository::create_batch::CreateBatch;
use stitchtrack_db::utils::generate_item_id;
use tracing::warn;

use crate::utils::{is_unique_violation, stored_now, timestamp_text};

use super::repo_impl::ItemRepositoryImpl;

/// Generated ids tried per item before giving up with `DuplicateId`.
pub const MAX_ID_ATTEMPTS: usize = 5;

impl ItemRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &ItemRepositoryImpl,
        items: Vec<ItemModel>,
    ) -> Result<Vec<ItemModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for mut item in items {
            let now = stored_now();
            item.created_at = now;
            item.updated_at = now;

            // A caller-supplied id gets exactly one attempt
            let supplied = !item.id.is_empty();
            let attempts = if supplied { 1 } else { MAX_ID_ATTEMPTS };
            let mut inserted = false;

            for attempt in 1..=attempts {
                if !supplied {
                    item.id = generate_item_id();
                }
                if id_taken(&mut **transaction, &item.id).await? {
                    warn!(id = %item.id, attempt, "item id already taken");
                    continue;
                }
                match insert_item(&mut **transaction, &item).await {
                    Ok(()) => {
                        inserted = true;
                        break;
                    }
                    Err(err) if is_unique_violation(&err) => {
                        warn!(id = %item.id, attempt, "item id collided on insert");
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            if !inserted {
                return Err(InventoryError::DuplicateId(format!(
                    "no free id after {attempts} attempt(s), last tried {}",
                    item.id
                ))
                .into());
            }
            saved_items.push(item);
        }

        Ok(saved_items)
    }
}

async fn id_taken(conn: &mut SqliteConnection, id: &ItemId) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM items WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

async fn insert_item(conn: &mut SqliteConnection, item: &ItemModel) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO items (
            id, quantity, item_type, color, design, customer_name, team, number,
            size, age_group, name_bar, chest_logo, notes,
            date_ordered, date_invoiced, date_received, date_delivered,
            status, payment_status, needs_remake, tracking_number, location,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(item.id.as_str())
    .bind(item.quantity)
    .bind(&item.item_type)
    .bind(&item.color)
    .bind(&item.design)
    .bind(&item.customer_name)
    .bind(&item.team)
    .bind(&item.number)
    .bind(&item.size)
    .bind(item.age_group)
    .bind(&item.name_bar)
    .bind(&item.chest_logo)
    .bind(&item.notes)
    .bind(&item.date_ordered)
    .bind(&item.date_invoiced)
    .bind(&item.date_received)
    .bind(&item.date_delivered)
    .bind(item.status)
    .bind(item.payment_status)
    .bind(item.needs_remake)
    .bind(&item.tracking_number)
    .bind(&item.location)
    .bind(timestamp_text(&item.created_at))
    .bind(timestamp_text(&item.updated_at))
    .execute(conn)
    .await?;
    Ok(())
}

#[async_trait]
impl CreateBatch<Sqlite, ItemModel> for ItemRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ItemModel>,
    ) -> Result<Vec<ItemModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
