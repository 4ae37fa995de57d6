use sqlx::{QueryBuilder, Sqlite};
use std::error::Error;
use stitchtrack_api::{ItemFilter, ItemQuery};
use stitchtrack_db::models::inventory::ItemModel;
use stitchtrack_db::repository::pagination::{Page, PageRequest};

use crate::utils::{like_contains_pattern, TryFromRow};

use super::repo_impl::ItemRepositoryImpl;

const SEARCH_COLUMNS: &[&str] = &["customer_name", "number", "id", "name_bar", "notes"];

/// Appends the `WHERE` clause for the query filters, all values bound.
fn push_filters<'args>(builder: &mut QueryBuilder<'args, Sqlite>, query: &'args ItemQuery) {
    builder.push(" WHERE 1 = 1");
    for filter in &query.filters {
        match filter {
            ItemFilter::Status(status) => {
                builder.push(" AND status = ").push_bind(*status);
            }
            ItemFilter::Location(location) => {
                builder.push(" AND location = ").push_bind(location.as_str());
            }
            ItemFilter::Search(term) => {
                let pattern = like_contains_pattern(term);
                builder.push(" AND (");
                for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
                    if i > 0 {
                        builder.push(" OR ");
                    }
                    builder
                        .push(*column)
                        .push(" LIKE ")
                        .push_bind(pattern.clone())
                        .push(" ESCAPE '\\'");
                }
                builder.push(")");
            }
        }
    }
}

/// Only whitelisted column names and direction keywords reach the SQL text.
fn push_order(builder: &mut QueryBuilder<'_, Sqlite>, query: &ItemQuery) {
    let direction = query.direction.keyword();
    builder
        .push(" ORDER BY ")
        .push(query.sort.column_name())
        .push(" ")
        .push(direction)
        .push(", rowid ")
        .push(direction);
}

impl ItemRepositoryImpl {
    /// Items matching every filter, in the requested order.
    pub async fn query(
        &self,
        query: &ItemQuery,
    ) -> Result<Vec<ItemModel>, Box<dyn Error + Send + Sync>> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM items");
        push_filters(&mut builder, query);
        push_order(&mut builder, query);

        let rows = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            builder.build().fetch_all(&mut **transaction).await?
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(ItemModel::try_from_row(&row)?);
        }
        Ok(items)
    }

    /// One page of [`ItemRepositoryImpl::query`] plus the total match count.
    pub async fn query_page(
        &self,
        query: &ItemQuery,
        page: PageRequest,
    ) -> Result<Page<ItemModel>, Box<dyn Error + Send + Sync>> {
        let mut count_builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM items");
        push_filters(&mut count_builder, query);

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM items");
        push_filters(&mut builder, query);
        push_order(&mut builder, query);
        builder
            .push(" LIMIT ")
            .push_bind(page.limit_i64())
            .push(" OFFSET ")
            .push_bind(page.offset_i64());

        let (total, rows) = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            let total: i64 = count_builder
                .build_query_scalar()
                .fetch_one(&mut **transaction)
                .await?;
            let rows = builder.build().fetch_all(&mut **transaction).await?;
            (total, rows)
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(ItemModel::try_from_row(&row)?);
        }
        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}
