use std::sync::Arc;

use stitchtrack_api::{InventoryError, InventoryResult};
use stitchtrack_db::models::inventory::{
    LocationModel, LocationUsageModel, LOCATION_DESCRIPTION_MAX, LOCATION_NAME_MAX,
};
use stitchtrack_db::repository::create_batch::CreateBatch;
use stitchtrack_db::repository::delete_batch::DeleteBatch;
use stitchtrack_db::repository::load_batch::LoadBatch;
use tracing::{info, instrument};

use crate::repository::{InventoryRepoFactory, InventoryRepositories};
use crate::sqlite_store::Store;
use crate::utils::to_heapless;

use super::finish;

/// Registry of named storage locations.
///
/// Items refer to locations by name only, so a location may be removed
/// only while no item carries its name.
pub struct LocationRegistry {
    store: Arc<Store>,
    repo_factory: Arc<InventoryRepoFactory>,
}

impl LocationRegistry {
    pub fn new(store: Arc<Store>, repo_factory: Arc<InventoryRepoFactory>) -> Self {
        Self { store, repo_factory }
    }

    /// Registers a new location. The name is trimmed; a blank description
    /// is stored as none.
    #[instrument(skip(self, description))]
    pub async fn add(&self, name: &str, description: Option<&str>) -> InventoryResult<LocationModel> {
        let location = new_location(name, description)?;

        let session = self.store.begin_write().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = async {
            if repos.location_repository.find_by_name(&location.name).await?.is_some() {
                return Err(InventoryError::DuplicateLocation(location.name.to_string()));
            }
            let saved = insert_one(&repos, location).await?;
            info!(id = saved.id, name = %saved.name, "location added");
            Ok::<_, InventoryError>(saved)
        }
        .await;
        finish(session, result).await
    }

    /// Like [`LocationRegistry::add`], but an existing name is a no-op and
    /// yields `None`.
    pub async fn ensure(&self, name: &str, description: Option<&str>) -> InventoryResult<Option<LocationModel>> {
        match self.add(name, description).await {
            Ok(location) => Ok(Some(location)),
            Err(InventoryError::DuplicateLocation(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Removes a location that no item references.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i64) -> InventoryResult<()> {
        let session = self.store.begin_write().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = async {
            let location = repos
                .location_repository
                .load_batch(&[id])
                .await?
                .pop()
                .flatten()
                .ok_or_else(|| InventoryError::NotFound(format!("location {id}")))?;

            let usage = repos.location_repository.usage_count(&location.name).await?;
            if usage > 0 {
                return Err(InventoryError::LocationInUse {
                    name: location.name.to_string(),
                    usage,
                });
            }

            repos.location_repository.delete_batch(&[id]).await?;
            info!(id, name = %location.name, "location removed");
            Ok::<_, InventoryError>(())
        }
        .await;
        finish(session, result).await
    }

    /// Every location ordered by name, with its live usage count.
    pub async fn list(&self) -> InventoryResult<Vec<LocationUsageModel>> {
        let session = self.store.begin_read().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = repos
            .location_repository
            .list_with_usage()
            .await
            .map_err(InventoryError::from);
        finish(session, result).await
    }

    pub async fn find_by_name(&self, name: &str) -> InventoryResult<Option<LocationModel>> {
        let session = self.store.begin_read().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = repos
            .location_repository
            .find_by_name(name.trim())
            .await
            .map_err(InventoryError::from);
        finish(session, result).await
    }

    #[instrument(skip(self, description))]
    pub async fn update_description(&self, id: i64, description: Option<&str>) -> InventoryResult<()> {
        let description = checked_description(description)?;

        let session = self.store.begin_write().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = repos
            .location_repository
            .update_description(id, description)
            .await
            .map_err(InventoryError::from);
        finish(session, result).await
    }
}

async fn insert_one(repos: &InventoryRepositories, location: LocationModel) -> InventoryResult<LocationModel> {
    repos
        .location_repository
        .create_batch(vec![location])
        .await?
        .pop()
        .ok_or_else(|| InventoryError::InternalError("insert returned no row".to_string()))
}

fn new_location(name: &str, description: Option<&str>) -> InventoryResult<LocationModel> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InventoryError::ValidationError("location name is required".to_string()));
    }
    if name.chars().count() > LOCATION_NAME_MAX {
        return Err(InventoryError::ValidationError(format!(
            "location name exceeds {LOCATION_NAME_MAX} characters"
        )));
    }
    let description = checked_description(description)?;

    Ok(LocationModel {
        id: 0,
        name: to_heapless(name, "location name").map_err(InventoryError::ValidationError)?,
        description: description
            .map(|d| to_heapless(d, "location description"))
            .transpose()
            .map_err(InventoryError::ValidationError)?,
    })
}

fn checked_description(description: Option<&str>) -> InventoryResult<Option<&str>> {
    let description = description.map(str::trim).filter(|d| !d.is_empty());
    if let Some(d) = description {
        if d.chars().count() > LOCATION_DESCRIPTION_MAX {
            return Err(InventoryError::ValidationError(format!(
                "location description exceeds {LOCATION_DESCRIPTION_MAX} characters"
            )));
        }
    }
    Ok(description)
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_service_context;
    use stitchtrack_api::{CreateItemRequest, InventoryError};

    #[tokio::test]
    async fn test_add_trims_and_rejects_duplicates() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let locations = &ctx.services.locations;

        let added = locations.add("  Shelf A ", Some("  ")).await?;
        assert_eq!(added.name.as_str(), "Shelf A");
        assert!(added.description.is_none());

        let err = locations.add("Shelf A", Some("again")).await.unwrap_err();
        assert!(matches!(err, InventoryError::DuplicateLocation(ref name) if name == "Shelf A"));

        assert!(locations.ensure("Shelf A", None).await?.is_none());
        assert!(locations.ensure("Shelf B", None).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_add_validates_lengths() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let locations = &ctx.services.locations;

        assert!(matches!(locations.add("   ", None).await, Err(InventoryError::ValidationError(_))));
        assert!(matches!(
            locations.add(&"x".repeat(51), None).await,
            Err(InventoryError::ValidationError(_))
        ));
        assert!(matches!(
            locations.add("Shelf C", Some(&"d".repeat(201))).await,
            Err(InventoryError::ValidationError(_))
        ));
        assert!(locations.add(&"x".repeat(50), Some(&"d".repeat(200))).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_refuses_location_in_use() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let locations = &ctx.services.locations;
        let lifecycle = &ctx.services.lifecycle;

        let shelf = locations.add("Shelf A", None).await?;
        let item = lifecycle
            .create_item(CreateItemRequest {
                location: Some("Shelf A".to_string()),
                ..CreateItemRequest::for_customer("Stocked")
            })
            .await?;

        let err = locations.remove(shelf.id).await.unwrap_err();
        assert!(matches!(err, InventoryError::LocationInUse { ref name, usage: 1 } if name == "Shelf A"));

        lifecycle.delete_item(&item.id).await?;
        locations.remove(shelf.id).await?;
        assert!(locations.find_by_name("Shelf A").await?.is_none());

        let err = locations.remove(shelf.id).await.unwrap_err();
        assert!(matches!(err, InventoryError::NotFound(_)));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_and_update_description() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let locations = &ctx.services.locations;

        let listed = locations.list().await?;
        assert_eq!(listed.len(), 4);
        assert!(listed.iter().all(|l| l.is_deletable()));

        let warehouse = locations.find_by_name(" Warehouse ").await?.expect("seeded");
        locations.update_description(warehouse.id, Some("Bay 3")).await?;
        let reloaded = locations.find_by_name("Warehouse").await?.expect("seeded");
        assert_eq!(reloaded.description.as_deref(), Some("Bay 3"));

        Ok(())
    }
}
