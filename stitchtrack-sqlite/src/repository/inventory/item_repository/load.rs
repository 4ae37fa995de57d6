use async_trait::async_trait;
use sqlx::Sqlite;
use std::error::Error;
use stitchtrack_db::models::inventory::{ItemId, ItemModel};
use stitchtrack_db::repository::load::Load;

use crate::utils::TryFromRow;

use super::repo_impl::ItemRepositoryImpl;

impl ItemRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &ItemRepositoryImpl,
        id: &ItemId,
    ) -> Result<Option<ItemModel>, Box<dyn Error + Send + Sync>> {
        let row = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query("SELECT * FROM items WHERE id = ?")
                .bind(id.as_str())
                .fetch_optional(&mut **transaction)
                .await?
        };

        row.map(|row| ItemModel::try_from_row(&row)).transpose()
    }
}

#[async_trait]
impl Load<Sqlite, ItemModel> for ItemRepositoryImpl {
    async fn load(&self, id: &ItemId) -> Result<Option<ItemModel>, Box<dyn Error + Send + Sync>> {
        Self::load_impl(self, id).await
    }
}
