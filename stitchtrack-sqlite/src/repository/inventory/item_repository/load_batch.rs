use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};
use std::collections::HashMap;
use std::error::Error;
use stitchtrack_db::models::inventory::{ItemId, ItemModel};
use stitchtrack_db::repository::load_batch::LoadBatch;

use crate::utils::{push_in_list, TryFromRow};

use super::repo_impl::ItemRepositoryImpl;

impl ItemRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &ItemRepositoryImpl,
        ids: &[ItemId],
    ) -> Result<Vec<Option<ItemModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM items WHERE id IN ");
        push_in_list(&mut builder, ids);
        let rows = {
            let mut tx = repo.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            builder.build().fetch_all(&mut **transaction).await?
        };

        let mut item_map = HashMap::new();
        for row in rows {
            let item = ItemModel::try_from_row(&row)?;
            item_map.insert(item.id.clone(), item);
        }

        let mut result = Vec::with_capacity(ids.len());
        for id in ids {
            result.push(item_map.get(id).cloned());
        }
        Ok(result)
    }
}

#[async_trait]
impl LoadBatch<Sqlite, ItemModel> for ItemRepositoryImpl {
    async fn load_batch(&self, ids: &[ItemId]) -> Result<Vec<Option<ItemModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
