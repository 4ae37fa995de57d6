use async_trait::async_trait;
use sqlx::Sqlite;
use std::error::Error;
use stitchtrack_api::ItemStatus;
use stitchtrack_db::models::inventory::{ItemId, StatusHistoryModel};
use stitchtrack_db::repository::create_batch::CreateBatch;

use crate::utils::{stored_now, timestamp_text};

use super::repo_impl::StatusHistoryRepositoryImpl;

impl StatusHistoryRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &StatusHistoryRepositoryImpl,
        items: Vec<StatusHistoryModel>,
    ) -> Result<Vec<StatusHistoryModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for mut item in items {
            item.changed_at = stored_now();
            let result = sqlx::query(
                r#"
                INSERT INTO status_history (item_id, old_status, new_status, location, changed_at, note)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(item.item_id.as_str())
            .bind(item.old_status)
            .bind(item.new_status)
            .bind(&item.location)
            .bind(timestamp_text(&item.changed_at))
            .bind(&item.note)
            .execute(&mut **transaction)
            .await?;

            item.id = result.last_insert_rowid();
            saved_items.push(item);
        }

        Ok(saved_items)
    }

    /// Appends one transition for an item, stamped with the current time.
    pub async fn record(
        &self,
        item_id: &ItemId,
        old_status: Option<ItemStatus>,
        new_status: ItemStatus,
        location: Option<String>,
        note: Option<String>,
    ) -> Result<StatusHistoryModel, Box<dyn Error + Send + Sync>> {
        let entry = StatusHistoryModel::new(item_id.clone(), old_status, new_status, location, note);
        let mut saved = Self::create_batch_impl(self, vec![entry]).await?;
        saved.pop().ok_or_else(|| "History entry was not saved".into())
    }
}

#[async_trait]
impl CreateBatch<Sqlite, StatusHistoryModel> for StatusHistoryRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<StatusHistoryModel>,
    ) -> Result<Vec<StatusHistoryModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
