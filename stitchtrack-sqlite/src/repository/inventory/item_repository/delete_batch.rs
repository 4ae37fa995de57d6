use async_trait::async_trait;
use sqlx::Sqlite;
use std::error::Error;
use stitchtrack_db::models::inventory::{ItemId, ItemModel};
use stitchtrack_db::repository::delete_batch::DeleteBatch;

use super::repo_impl::ItemRepositoryImpl;

impl ItemRepositoryImpl {
    pub(super) async fn delete_batch_impl(
        repo: &ItemRepositoryImpl,
        ids: &[ItemId],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut deleted = 0;
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for id in ids {
            // History tables from before the cascade was added need this explicitly
            sqlx::query("DELETE FROM status_history WHERE item_id = ?")
                .bind(id.as_str())
                .execute(&mut **transaction)
                .await?;
            let result = sqlx::query("DELETE FROM items WHERE id = ?")
                .bind(id.as_str())
                .execute(&mut **transaction)
                .await?;
            deleted += result.rows_affected() as usize;
        }

        Ok(deleted)
    }
}

#[async_trait]
impl DeleteBatch<Sqlite, ItemModel> for ItemRepositoryImpl {
    async fn delete_batch(
        &self,
        ids: &[ItemId],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use stitchtrack_api::ItemStatus;
    use stitchtrack_db::models::inventory::StatusHistoryModel;
    use stitchtrack_db::repository::create_batch::CreateBatch;
    use stitchtrack_db::repository::delete_batch::DeleteBatch;
    use stitchtrack_db::repository::load::Load;
    use super::super::test_utils::{create_test_item, item_id};

    #[tokio::test]
    async fn test_delete_batch_skips_missing_ids() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let item_repo = &ctx.inventory_repos().item_repository;

        let saved = item_repo
            .create_batch(vec![create_test_item("Keep"), create_test_item("Drop")])
            .await?;

        let deleted = item_repo
            .delete_batch(&[saved[1].id.clone(), item_id("MISSING1")])
            .await?;
        assert_eq!(deleted, 1);
        assert!(item_repo.load(&saved[0].id).await?.is_some());
        assert!(item_repo.load(&saved[1].id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_only_own_history() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let item_repo = &ctx.inventory_repos().item_repository;
        let history_repo = &ctx.inventory_repos().status_history_repository;

        let saved = item_repo
            .create_batch(vec![create_test_item("Keep"), create_test_item("Drop")])
            .await?;
        for item in &saved {
            history_repo
                .create_batch(vec![StatusHistoryModel::new(
                    item.id.clone(),
                    None,
                    ItemStatus::Ordered,
                    None,
                    Some("Created".to_string()),
                )])
                .await?;
        }

        item_repo.delete_batch(&[saved[1].id.clone()]).await?;

        assert_eq!(history_repo.list_for(&saved[0].id).await?.len(), 1);
        assert!(history_repo.list_for(&saved[1].id).await?.is_empty());

        Ok(())
    }
}
