use crate::executor::Executor;
use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use sqlx::{sqlite::SqliteRow, Row};
use std::error::Error;
use stitchtrack_db::models::inventory::LocationModel;

pub struct LocationRepositoryImpl {
    pub executor: Executor,
}

impl LocationRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<SqliteRow> for LocationModel {
    fn try_from_row(row: &SqliteRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(LocationModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            description: get_optional_heapless_string(row, "description")?,
        })
    }
}
