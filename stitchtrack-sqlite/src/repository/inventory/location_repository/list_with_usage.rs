use std::error::Error;
use stitchtrack_db::models::inventory::{LocationModel, LocationUsageModel, LocationUsageRow};

use crate::utils::to_heapless;

use super::repo_impl::LocationRepositoryImpl;

impl LocationRepositoryImpl {
    /// All locations ordered by name, each with its live item count.
    pub async fn list_with_usage(&self) -> Result<Vec<LocationUsageModel>, Box<dyn Error + Send + Sync>> {
        let rows: Vec<LocationUsageRow> = {
            let mut tx = self.executor.tx.lock().await;
            let transaction = tx.as_mut().ok_or("Transaction has been consumed")?;
            sqlx::query_as(
                r#"
                SELECT l.id, l.name, l.description, COUNT(i.id) AS usage_count
                FROM locations l
                LEFT JOIN items i ON i.location = l.name
                GROUP BY l.id, l.name, l.description
                ORDER BY l.name
                "#,
            )
            .fetch_all(&mut **transaction)
            .await?
        };

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let description = row
                .description
                .as_deref()
                .map(|d| to_heapless(d, "location description"))
                .transpose()?;
            result.push(LocationUsageModel {
                location: LocationModel {
                    id: row.id,
                    name: to_heapless(&row.name, "location name")?,
                    description,
                },
                usage_count: row.usage_count,
            });
        }
        Ok(result)
    }
}
