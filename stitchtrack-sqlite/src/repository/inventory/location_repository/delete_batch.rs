use async_trait::async_trait;
use sqlx::Sqlite;
use std::error::Error;
use stitchtrack_db::models::inventory::LocationModel;
use stitchtrack_db::repository::delete_batch::DeleteBatch;

use super::repo_impl::LocationRepositoryImpl;

impl LocationRepositoryImpl {
    /// Removes registry rows only. Callers check usage first; items keep
    /// their location text either way.
    pub(super) async fn delete_batch_impl(
        repo: &LocationRepositoryImpl,
        ids: &[i64],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut deleted = 0;
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        for id in ids {
            let result = sqlx::query("DELETE FROM locations WHERE id = ?")
                .bind(id)
                .execute(&mut **transaction)
                .await?;
            deleted += result.rows_affected() as usize;
        }
        Ok(deleted)
    }
}

#[async_trait]
impl DeleteBatch<Sqlite, LocationModel> for LocationRepositoryImpl {
    async fn delete_batch(
        &self,
        ids: &[i64],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids).await
    }
}
