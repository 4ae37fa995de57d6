use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::identifiable::Identifiable;

pub const LOCATION_NAME_MAX: usize = 50;
pub const LOCATION_DESCRIPTION_MAX: usize = 200;

/// Named place where inventory physically resides. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationModel {
    pub id: i64,
    pub name: HeaplessString<LOCATION_NAME_MAX>,
    pub description: Option<HeaplessString<LOCATION_DESCRIPTION_MAX>>,
}

impl Identifiable for LocationModel {
    type Id = i64;

    fn get_id(&self) -> i64 {
        self.id
    }
}

/// A location together with the live count of items referencing it by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationUsageModel {
    pub location: LocationModel,
    pub usage_count: i64,
}

impl LocationUsageModel {
    pub fn is_deletable(&self) -> bool {
        self.usage_count == 0
    }
}

/// Row shape of the per-location usage aggregate.
#[derive(Debug, Clone, FromRow)]
pub struct LocationUsageRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub usage_count: i64,
}
