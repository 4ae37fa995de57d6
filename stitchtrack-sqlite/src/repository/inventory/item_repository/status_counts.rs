use std::error::Error;
use stitchtrack_api::ItemStatus;
use stitchtrack_db::models::inventory::StatusCountsModel;

use super::repo_impl::ItemRepositoryImpl;

impl ItemRepositoryImpl {
    /// Number of items per status; statuses without items count zero.
    pub async fn status_counts(&self) -> Result<StatusCountsModel, Box<dyn Error + Send + Sync>> {
        let rows: Vec<(ItemStatus, i64)> = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query_as("SELECT status, COUNT(*) FROM items GROUP BY status")
                .fetch_all(&mut **transaction)
                .await?
        };
        Ok(StatusCountsModel::from_counts(rows))
    }
}
