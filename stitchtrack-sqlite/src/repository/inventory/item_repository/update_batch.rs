use async_trait::async_trait;
use sqlx::Sqlite;
use std::error::Error;
use stitchtrack_api::InventoryError;
use stitchtrack_db::models::inventory::ItemModel;
use stitchtrack_db::repository::update_batch::UpdateBatch;

use crate::utils::{stored_now, timestamp_text, TryFromRow};

use super::repo_impl::ItemRepositoryImpl;

impl ItemRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &ItemRepositoryImpl,
        items: Vec<ItemModel>,
    ) -> Result<Vec<ItemModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut updated_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for item in items {
            // id and created_at are never written here
            let row = sqlx::query(
                r#"
                UPDATE items SET
                    quantity = ?, item_type = ?, color = ?, design = ?, customer_name = ?,
                    team = ?, number = ?, size = ?, age_group = ?, name_bar = ?,
                    chest_logo = ?, notes = ?, date_ordered = ?, date_invoiced = ?,
                    date_received = ?, date_delivered = ?, status = ?, payment_status = ?,
                    needs_remake = ?, tracking_number = ?, location = ?, updated_at = ?
                WHERE id = ?
                RETURNING *
                "#,
            )
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
            .bind(timestamp_text(&stored_now()))
            .bind(item.id.as_str())
            .fetch_optional(&mut **transaction)
            .await?;

            match row {
                Some(row) => updated_items.push(ItemModel::try_from_row(&row)?),
                None => return Err(InventoryError::NotFound(format!("item {}", item.id)).into()),
            }
        }

        Ok(updated_items)
    }
}

#[async_trait]
impl UpdateBatch<Sqlite, ItemModel> for ItemRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<ItemModel>,
    ) -> Result<Vec<ItemModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use chrono::{Duration, Utc};
    use stitchtrack_api::{InventoryError, ItemStatus};
    use stitchtrack_db::repository::create_batch::CreateBatch;
    use stitchtrack_db::repository::update_batch::UpdateBatch;
    use super::super::test_utils::{create_test_item, item_id};

    #[tokio::test]
    async fn test_update_batch_keeps_created_at() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let item_repo = &ctx.inventory_repos().item_repository;

        let saved = item_repo.create_batch(vec![create_test_item("Before")]).await?;
        let original = saved[0].clone();

        let mut changed = original.clone();
        changed.customer_name = "After".to_string();
        changed.status = ItemStatus::Received;
        changed.quantity = 3;
        // A caller cannot move created_at
        changed.created_at = Utc::now() - Duration::days(30);

        let updated = item_repo.update_batch(vec![changed]).await?;
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].customer_name, "After");
        assert_eq!(updated[0].status, ItemStatus::Received);
        assert_eq!(updated[0].quantity, 3);
        assert_eq!(updated[0].created_at, original.created_at);
        assert!(updated[0].updated_at >= original.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let item_repo = &ctx.inventory_repos().item_repository;

        let mut ghost = create_test_item("Ghost");
        ghost.id = item_id("GHOST000");
        let err: InventoryError = item_repo.update_batch(vec![ghost]).await.unwrap_err().into();
        assert!(matches!(err, InventoryError::NotFound(_)));

        Ok(())
    }
}
