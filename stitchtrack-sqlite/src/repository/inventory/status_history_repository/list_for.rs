use std::error::Error;
use stitchtrack_db::models::inventory::{ItemId, StatusHistoryModel};

use crate::utils::TryFromRow;

use super::repo_impl::StatusHistoryRepositoryImpl;

impl StatusHistoryRepositoryImpl {
    /// Full history of one item, most recent first.
    pub async fn list_for(
        &self,
        item_id: &ItemId,
    ) -> Result<Vec<StatusHistoryModel>, Box<dyn Error + Send + Sync>> {
        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query(
                "SELECT * FROM status_history WHERE item_id = ? ORDER BY changed_at DESC, id DESC",
            )
            .bind(item_id.as_str())
            .fetch_all(&mut **transaction)
            .await?
        };

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(StatusHistoryModel::try_from_row(&row)?);
        }
        Ok(entries)
    }
}
