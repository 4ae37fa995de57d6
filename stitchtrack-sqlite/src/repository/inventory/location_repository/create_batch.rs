use async_trait::async_trait;
use sqlx::Sqlite;
use std::error::Error;
use stitchtrack_api::InventoryError;
use stitchtrack_db::models::inventory::LocationModel;
use stitchtrack_db::repository::create_batch::CreateBatch;

use crate::utils::is_unique_violation;

use super::repo_impl::LocationRepositoryImpl;

impl LocationRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &LocationRepositoryImpl,
        items: Vec<LocationModel>,
    ) -> Result<Vec<LocationModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut saved_items = Vec::with_capacity(items.len());
        let mut tx = repo.executor.tx.lock().await;
        let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;

        for mut item in items {
            let result = sqlx::query("INSERT INTO locations (name, description) VALUES (?, ?)")
                .bind(item.name.as_str())
                .bind(item.description.as_ref().map(|d| d.as_str()))
                .execute(&mut **transaction)
                .await;

            match result {
                Ok(done) => {
                    item.id = done.last_insert_rowid();
                    saved_items.push(item);
                }
                Err(err) if is_unique_violation(&err) => {
                    return Err(InventoryError::DuplicateLocation(item.name.to_string()).into());
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(saved_items)
    }
}

#[async_trait]
impl CreateBatch<Sqlite, LocationModel> for LocationRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<LocationModel>,
    ) -> Result<Vec<LocationModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
