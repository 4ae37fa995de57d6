use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Location already exists: {0}")]
    DuplicateLocation(String),

    #[error("Location '{name}' is still used by {usage} item(s)")]
    LocationInUse { name: String, usage: i64 },

    #[error("Could not allocate a unique item id: {0}")]
    DuplicateId(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

impl InventoryError {
    /// True for the outcomes the caller may treat as a no-op redirect.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            InventoryError::NotFound(_)
                | InventoryError::DuplicateLocation(_)
                | InventoryError::LocationInUse { .. }
        )
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for InventoryError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match err.downcast::<InventoryError>() {
            Ok(inventory_error) => *inventory_error,
            Err(other) => InventoryError::DatabaseError(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for InventoryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        InventoryError::ValidationError(errors.to_string())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for InventoryError {
    fn from(err: sqlx::Error) -> Self {
        InventoryError::DatabaseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_inventory_error_round_trips() {
        let boxed: Box<dyn std::error::Error + Send + Sync> =
            Box::new(InventoryError::NotFound("item ABC".to_string()));
        let err: InventoryError = boxed.into();
        assert!(matches!(err, InventoryError::NotFound(ref id) if id == "item ABC"));
    }

    #[test]
    fn test_foreign_boxed_error_becomes_database_error() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = "disk I/O error".into();
        let err: InventoryError = boxed.into();
        assert!(matches!(err, InventoryError::DatabaseError(ref msg) if msg == "disk I/O error"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_location_in_use_message() {
        let err = InventoryError::LocationInUse {
            name: "Shelf A".to_string(),
            usage: 3,
        };
        assert_eq!(err.to_string(), "Location 'Shelf A' is still used by 3 item(s)");
        assert!(err.is_recoverable());
    }
}
