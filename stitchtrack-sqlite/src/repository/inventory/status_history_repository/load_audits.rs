use async_trait::async_trait;
use sqlx::Sqlite;
use std::error::Error;
use stitchtrack_db::models::inventory::{ItemId, ItemModel, StatusHistoryModel};
use stitchtrack_db::repository::load_audits::LoadAudits;
use stitchtrack_db::repository::pagination::{Page, PageRequest};

use crate::utils::TryFromRow;

use super::repo_impl::StatusHistoryRepositoryImpl;

impl StatusHistoryRepositoryImpl {
    pub(super) async fn load_audits_impl(
        repo: &StatusHistoryRepositoryImpl,
        id: &ItemId,
        page: PageRequest,
    ) -> Result<Page<StatusHistoryModel>, Box<dyn Error + Send + Sync>> {
        let (total, rows) = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM status_history WHERE item_id = ?")
                .bind(id.as_str())
                .fetch_one(&mut **transaction)
                .await?;

            let rows = sqlx::query(
                r#"
                SELECT * FROM status_history
                WHERE item_id = ?
                ORDER BY changed_at DESC, id DESC
                LIMIT ? OFFSET ?
                "#,
            )
            .bind(id.as_str())
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&mut **transaction)
            .await?;
            (total, rows)
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(StatusHistoryModel::try_from_row(&row)?);
        }

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[async_trait]
impl LoadAudits<Sqlite, ItemModel> for StatusHistoryRepositoryImpl {
    async fn load_audits(
        &self,
        id: &ItemId,
        page: PageRequest,
    ) -> Result<Page<StatusHistoryModel>, Box<dyn Error + Send + Sync>> {
        Self::load_audits_impl(self, id, page).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crate::repository::inventory::item_repository::test_utils::{create_test_item, item_id};
    use stitchtrack_api::ItemStatus;
    use stitchtrack_db::repository::create_batch::CreateBatch;
    use stitchtrack_db::repository::load_audits::LoadAudits;
    use stitchtrack_db::repository::pagination::PageRequest;

    #[tokio::test]
    async fn test_load_audits() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let item_repo = &ctx.inventory_repos().item_repository;
        let history_repo = &ctx.inventory_repos().status_history_repository;

        let saved = item_repo.create_batch(vec![create_test_item("Paged")]).await?;
        let id = &saved[0].id;

        history_repo.record(id, None, ItemStatus::Ordered, None, None).await?;
        let transitions = [
            (ItemStatus::Ordered, ItemStatus::Received),
            (ItemStatus::Received, ItemStatus::Inventory),
            (ItemStatus::Inventory, ItemStatus::Delivered),
        ];
        for (old, new) in transitions {
            history_repo.record(id, Some(old), new, None, None).await?;
        }

        let page = history_repo.load_audits(id, PageRequest::new(2, 0)).await?;
        assert_eq!(page.total, 4);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].new_status, ItemStatus::Delivered);
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_more());

        let page2 = history_repo.load_audits(id, PageRequest::new(2, 2)).await?;
        assert_eq!(page2.items.len(), 2);
        assert!(page2.items[1].is_creation());
        assert!(!page2.has_more());

        Ok(())
    }

    #[tokio::test]
    async fn test_load_audits_empty() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let history_repo = &ctx.inventory_repos().status_history_repository;

        let page = history_repo.load_audits(&item_id("NOHIST00"), PageRequest::new(20, 0)).await?;
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.page_number(), 1);
        assert!(!page.has_more());

        Ok(())
    }
}
