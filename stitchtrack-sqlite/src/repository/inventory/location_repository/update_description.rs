use std::error::Error;
use stitchtrack_api::InventoryError;

use super::repo_impl::LocationRepositoryImpl;

impl LocationRepositoryImpl {
    /// Replaces the description of one location; `None` clears it.
    pub async fn update_description(
        &self,
        id: i64,
        description: Option<&str>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut tx = self.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
        let result = sqlx::query("UPDATE locations SET description = ? WHERE id = ?")
            .bind(description)
            .bind(id)
            .execute(&mut **transaction)
            .await?;
        if result.rows_affected() == 0 {
            return Err(InventoryError::NotFound(format!("location {id}")).into());
        }
        Ok(())
    }
}
