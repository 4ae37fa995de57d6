use std::error::Error;
use stitchtrack_db::models::inventory::LocationModel;

use crate::utils::TryFromRow;

use super::repo_impl::LocationRepositoryImpl;

impl LocationRepositoryImpl {
    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<LocationModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM locations WHERE name = ?")
                .bind(name)
                .fetch_optional(&mut **transaction)
                .await?
        };
        row.map(|row| LocationModel::try_from_row(&row)).transpose()
    }

    /// Number of items whose location is exactly `name`.
    pub async fn usage_count(&self, name: &str) -> Result<i64, Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE location = ?")
            .bind(name)
            .fetch_one(&mut **transaction)
            .await?;
        Ok(count)
    }
}
