use sqlx::{QueryBuilder, Sqlite};
use std::error::Error;
use stitchtrack_api::BulkUpdateFields;
use stitchtrack_db::models::inventory::ItemId;

use crate::utils::{stored_now, timestamp_text};

use super::repo_impl::ItemRepositoryImpl;

impl ItemRepositoryImpl {
    /// Applies the same partial field set to every listed item.
    ///
    /// Only the fields present in `fields` are written; `updated_at` is
    /// re-stamped on each affected row. Ids that no longer exist are
    /// skipped. Returns the number of rows updated.
    pub async fn bulk_update(
        &self,
        ids: &[ItemId],
        fields: &BulkUpdateFields,
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() || fields.is_empty() {
            return Ok(0);
        }

        let updated_at = timestamp_text(&stored_now());
        let mut updated = 0;
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for id in ids {
            let mut builder = QueryBuilder::<Sqlite>::new("UPDATE items SET updated_at = ");
            builder.push_bind(updated_at.as_str());
            if let Some(status) = fields.status {
                builder.push(", status = ").push_bind(status);
            }
            if let Some(payment_status) = fields.payment_status {
                builder.push(", payment_status = ").push_bind(payment_status);
            }
            if let Some(tracking_number) = &fields.tracking_number {
                builder.push(", tracking_number = ").push_bind(tracking_number.as_str());
            }
            if let Some(date_delivered) = &fields.date_delivered {
                builder.push(", date_delivered = ").push_bind(date_delivered.as_str());
            }
            builder.push(" WHERE id = ").push_bind(id.as_str());

            let result = builder.build().execute(&mut **transaction).await?;
            updated += result.rows_affected() as usize;
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use stitchtrack_api::{BulkUpdateFields, ItemStatus, PaymentStatus};
    use stitchtrack_db::repository::create_batch::CreateBatch;
    use stitchtrack_db::repository::load::Load;
    use super::super::test_utils::{create_test_item, item_id};

    #[tokio::test]
    async fn test_bulk_update_skips_missing_ids() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let item_repo = &ctx.inventory_repos().item_repository;

        let mut item = create_test_item("Bulk");
        item.tracking_number = "OLD-TRACK".to_string();
        let saved = item_repo.create_batch(vec![item]).await?;

        let fields = BulkUpdateFields {
            status: Some(ItemStatus::Delivered),
            date_delivered: Some("2025-02-01".to_string()),
            ..Default::default()
        };
        let count = item_repo
            .bulk_update(&[saved[0].id.clone(), item_id("MISSING1")], &fields)
            .await?;
        assert_eq!(count, 1);

        let loaded = item_repo.load(&saved[0].id).await?.expect("item exists");
        assert_eq!(loaded.status, ItemStatus::Delivered);
        assert_eq!(loaded.date_delivered.as_deref(), Some("2025-02-01"));
        // Omitted fields are untouched
        assert_eq!(loaded.payment_status, PaymentStatus::Unpaid);
        assert_eq!(loaded.tracking_number, "OLD-TRACK");
        assert_eq!(loaded.created_at, saved[0].created_at);
        assert!(loaded.updated_at >= saved[0].updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_field_set_writes_nothing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let item_repo = &ctx.inventory_repos().item_repository;

        let saved = item_repo.create_batch(vec![create_test_item("Idle")]).await?;
        let count = item_repo
            .bulk_update(&[saved[0].id.clone()], &BulkUpdateFields::default())
            .await?;
        assert_eq!(count, 0);

        Ok(())
    }
}
