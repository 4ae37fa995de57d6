use std::sync::Arc;

use chrono::Utc;
use stitchtrack_api::normalize::{normalize_optional_date, normalize_optional_text, normalize_size};
use stitchtrack_api::{
    BulkUpdateFields, CreateItemRequest, InventoryError, InventoryResult, ItemStatus,
    PaymentStatus, UpdateItemRequest,
};
use stitchtrack_db::models::inventory::{ItemId, ItemModel, StatusHistoryModel};
use stitchtrack_db::repository::create_batch::CreateBatch;
use stitchtrack_db::repository::delete_batch::DeleteBatch;
use stitchtrack_db::repository::load::Load;
use stitchtrack_db::repository::load_audits::LoadAudits;
use stitchtrack_db::repository::load_batch::LoadBatch;
use stitchtrack_db::repository::pagination::{Page, PageRequest};
use stitchtrack_db::repository::update_batch::UpdateBatch;
use stitchtrack_db::utils::today_iso;
use tracing::{debug, instrument};
use validator::Validate;

use crate::config::BulkHistoryPolicy;
use crate::repository::{InventoryRepoFactory, InventoryRepositories};
use crate::sqlite_store::Store;

use super::{finish, item_id_or_not_found, parse_item_ids};

pub const CREATED_NOTE: &str = "Created";
pub const BULK_UPDATE_NOTE: &str = "Bulk update";

/// Single-item and bulk mutations of items.
///
/// Every status-changing write and its history entry run in one write
/// session: either both are committed or neither is.
pub struct LifecycleController {
    store: Arc<Store>,
    repo_factory: Arc<InventoryRepoFactory>,
}

impl LifecycleController {
    pub fn new(store: Arc<Store>, repo_factory: Arc<InventoryRepoFactory>) -> Self {
        Self { store, repo_factory }
    }

    /// Creates an item and its creation entry (`old_status = None`, note `"Created"`).
    #[instrument(skip(self, request), fields(customer = %request.customer_name))]
    pub async fn create_item(&self, request: CreateItemRequest) -> InventoryResult<ItemModel> {
        self.create_item_with_note(request, CREATED_NOTE).await
    }

    /// Create path shared with ingestion, which records its own note.
    pub(crate) async fn create_item_with_note(
        &self,
        request: CreateItemRequest,
        note: &str,
    ) -> InventoryResult<ItemModel> {
        let item = item_from_create_request(request)?;

        let session = self.store.begin_write().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = create_with_history(&repos, item, note).await;
        finish(session, result).await
    }

    /// Full edit: every mutable field is overwritten from `request`.
    ///
    /// A history entry is written only when the status actually changed.
    #[instrument(skip(self, request))]
    pub async fn update_item(&self, id: &str, request: UpdateItemRequest) -> InventoryResult<ItemModel> {
        let id = item_id_or_not_found(id)?;
        let request = UpdateItemRequest {
            customer_name: request.customer_name.trim().to_string(),
            ..request
        };
        request.validate()?;

        let session = self.store.begin_write().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = async {
            let current = load_existing(&repos, &id).await?;
            let updated = apply_update_request(current.clone(), request);
            let saved = save_one(&repos, updated).await?;

            if saved.status != current.status {
                repos
                    .status_history_repository
                    .record(&saved.id, Some(current.status), saved.status, saved.location.clone(), None)
                    .await?;
            }
            debug!(id = %saved.id, old = %current.status, new = %saved.status, "item updated");
            Ok::<_, InventoryError>(saved)
        }
        .await;
        finish(session, result).await
    }

    /// Quick status transition. Always writes one history entry.
    ///
    /// Moving to `received` stamps `date_received` with today's date when it
    /// is still empty. The location changes only when one is supplied.
    #[instrument(skip(self, note))]
    pub async fn set_status(
        &self,
        id: &str,
        new_status: ItemStatus,
        location: Option<String>,
        note: Option<String>,
    ) -> InventoryResult<ItemModel> {
        let id = item_id_or_not_found(id)?;
        let location = normalize_optional_text(location.as_deref());
        let note = normalize_optional_text(note.as_deref());

        let session = self.store.begin_write().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = async {
            let current = load_existing(&repos, &id).await?;
            let mut updated = current.clone();
            updated.status = new_status;
            if new_status == ItemStatus::Received && updated.date_received.is_none() {
                updated.date_received = Some(today_iso());
            }
            if let Some(location) = location {
                updated.location = Some(location);
            }

            let saved = save_one(&repos, updated).await?;
            repos
                .status_history_repository
                .record(&saved.id, Some(current.status), saved.status, saved.location.clone(), note)
                .await?;
            debug!(id = %saved.id, old = %current.status, new = %saved.status, "status changed");
            Ok::<_, InventoryError>(saved)
        }
        .await;
        finish(session, result).await
    }

    /// Overwrites the payment status only. Payment changes are not written
    /// to the history ledger.
    #[instrument(skip(self))]
    pub async fn set_payment_status(&self, id: &str, payment_status: PaymentStatus) -> InventoryResult<()> {
        let id = item_id_or_not_found(id)?;
        let fields = BulkUpdateFields {
            payment_status: Some(payment_status),
            ..Default::default()
        };

        let session = self.store.begin_write().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = async {
            let updated = repos
                .item_repository
                .bulk_update(std::slice::from_ref(&id), &fields)
                .await?;
            if updated == 0 {
                return Err(InventoryError::NotFound(format!("item {id}")));
            }
            Ok::<_, InventoryError>(())
        }
        .await;
        finish(session, result).await
    }

    /// Applies one partial field set to every listed item that exists.
    ///
    /// Whether status changes get history entries depends on the configured
    /// [`BulkHistoryPolicy`]. Returns the number of items updated.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn bulk_apply<S: AsRef<str>>(
        &self,
        ids: &[S],
        fields: BulkUpdateFields,
    ) -> InventoryResult<usize> {
        let ids = parse_item_ids(ids);
        let fields = BulkUpdateFields {
            date_delivered: normalize_optional_date(fields.date_delivered.as_deref()),
            ..fields
        };
        if ids.is_empty() || fields.is_empty() {
            return Ok(0);
        }
        let policy = self.store.config().bulk_history;

        let session = self.store.begin_write().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = async {
            let before = match (policy, fields.status) {
                (BulkHistoryPolicy::Record, Some(_)) => repos.item_repository.load_batch(&ids).await?,
                _ => Vec::new(),
            };

            let updated = repos.item_repository.bulk_update(&ids, &fields).await?;

            if let Some(new_status) = fields.status {
                for item in before.into_iter().flatten() {
                    if item.status != new_status {
                        repos
                            .status_history_repository
                            .record(
                                &item.id,
                                Some(item.status),
                                new_status,
                                item.location.clone(),
                                Some(BULK_UPDATE_NOTE.to_string()),
                            )
                            .await?;
                    }
                }
            }
            debug!(updated, ?policy, "bulk update applied");
            Ok::<_, InventoryError>(updated)
        }
        .await;
        finish(session, result).await
    }

    /// Deletes an item together with its history.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: &str) -> InventoryResult<()> {
        let id = item_id_or_not_found(id)?;

        let session = self.store.begin_write().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = async {
            let deleted = repos.item_repository.delete_batch(std::slice::from_ref(&id)).await?;
            if deleted == 0 {
                return Err(InventoryError::NotFound(format!("item {id}")));
            }
            debug!(%id, "item deleted");
            Ok::<_, InventoryError>(())
        }
        .await;
        finish(session, result).await
    }

    /// Deletes every listed item that exists; returns how many were removed.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn bulk_delete<S: AsRef<str>>(&self, ids: &[S]) -> InventoryResult<usize> {
        let ids = parse_item_ids(ids);
        if ids.is_empty() {
            return Ok(0);
        }

        let session = self.store.begin_write().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = repos.item_repository.delete_batch(&ids).await.map_err(InventoryError::from);
        finish(session, result).await
    }

    pub async fn get_item(&self, id: &str) -> InventoryResult<ItemModel> {
        let id = item_id_or_not_found(id)?;
        let session = self.store.begin_read().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = load_existing(&repos, &id).await;
        finish(session, result).await
    }

    /// History of one item, most recent first.
    pub async fn history_for(&self, id: &str) -> InventoryResult<Vec<StatusHistoryModel>> {
        let id = item_id_or_not_found(id)?;
        let session = self.store.begin_read().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = repos
            .status_history_repository
            .list_for(&id)
            .await
            .map_err(InventoryError::from);
        finish(session, result).await
    }

    pub async fn history_page(
        &self,
        id: &str,
        page: PageRequest,
    ) -> InventoryResult<Page<StatusHistoryModel>> {
        let id = item_id_or_not_found(id)?;
        let session = self.store.begin_read().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = repos
            .status_history_repository
            .load_audits(&id, page)
            .await
            .map_err(InventoryError::from);
        finish(session, result).await
    }
}

async fn load_existing(repos: &InventoryRepositories, id: &ItemId) -> InventoryResult<ItemModel> {
    repos
        .item_repository
        .load(id)
        .await?
        .ok_or_else(|| InventoryError::NotFound(format!("item {id}")))
}

async fn save_one(repos: &InventoryRepositories, item: ItemModel) -> InventoryResult<ItemModel> {
    repos
        .item_repository
        .update_batch(vec![item])
        .await?
        .pop()
        .ok_or_else(|| InventoryError::InternalError("update returned no row".to_string()))
}

async fn create_with_history(
    repos: &InventoryRepositories,
    item: ItemModel,
    note: &str,
) -> InventoryResult<ItemModel> {
    let saved = repos
        .item_repository
        .create_batch(vec![item])
        .await?
        .pop()
        .ok_or_else(|| InventoryError::InternalError("insert returned no row".to_string()))?;
    repos
        .status_history_repository
        .record(&saved.id, None, saved.status, saved.location.clone(), Some(note.to_string()))
        .await?;
    debug!(id = %saved.id, status = %saved.status, "item created");
    Ok(saved)
}

/// Normalizes a create request into an unsaved item. The id is left empty
/// for the repository to assign.
fn item_from_create_request(request: CreateItemRequest) -> InventoryResult<ItemModel> {
    let request = CreateItemRequest {
        customer_name: request.customer_name.trim().to_string(),
        ..request
    };
    request.validate()?;

    let (size, derived_age) = normalize_size(&request.size);
    let now = Utc::now();
    Ok(ItemModel {
        id: ItemId::new(),
        quantity: request.quantity.unwrap_or(1),
        item_type: request.item_type.trim().to_string(),
        color: request.color.trim().to_string(),
        design: request.design.trim().to_string(),
        customer_name: request.customer_name,
        team: request.team.trim().to_string(),
        number: request.number.trim().to_string(),
        size,
        age_group: request.age_group.unwrap_or(derived_age),
        name_bar: request.name_bar.trim().to_string(),
        chest_logo: request.chest_logo.trim().to_string(),
        notes: request.notes.trim().to_string(),
        date_ordered: normalize_optional_date(request.date_ordered.as_deref()),
        date_invoiced: normalize_optional_date(request.date_invoiced.as_deref()),
        date_received: normalize_optional_date(request.date_received.as_deref()),
        date_delivered: normalize_optional_date(request.date_delivered.as_deref()),
        status: request.status.unwrap_or_default(),
        payment_status: request.payment_status.unwrap_or_default(),
        needs_remake: request.needs_remake,
        tracking_number: request.tracking_number.trim().to_string(),
        location: normalize_optional_text(request.location.as_deref()),
        created_at: now,
        updated_at: now,
    })
}

/// Overwrites every mutable field of `current`; id and timestamps are kept
/// for the repository to handle.
fn apply_update_request(current: ItemModel, request: UpdateItemRequest) -> ItemModel {
    let (size, derived_age) = normalize_size(&request.size);
    ItemModel {
        quantity: request.quantity,
        item_type: request.item_type.trim().to_string(),
        color: request.color.trim().to_string(),
        design: request.design.trim().to_string(),
        customer_name: request.customer_name,
        team: request.team.trim().to_string(),
        number: request.number.trim().to_string(),
        size,
        age_group: request.age_group.unwrap_or(derived_age),
        name_bar: request.name_bar.trim().to_string(),
        chest_logo: request.chest_logo.trim().to_string(),
        notes: request.notes.trim().to_string(),
        date_ordered: normalize_optional_date(request.date_ordered.as_deref()),
        date_invoiced: normalize_optional_date(request.date_invoiced.as_deref()),
        date_received: normalize_optional_date(request.date_received.as_deref()),
        date_delivered: normalize_optional_date(request.date_delivered.as_deref()),
        status: request.status,
        payment_status: request.payment_status,
        needs_remake: request.needs_remake,
        tracking_number: request.tracking_number.trim().to_string(),
        location: normalize_optional_text(request.location.as_deref()),
        ..current
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{BulkHistoryPolicy, StoreConfig};
    use crate::test_helper::{setup_service_context, setup_service_context_with};
    use stitchtrack_api::{
        AgeGroup, BulkUpdateFields, CreateItemRequest, InventoryError, ItemStatus, PaymentStatus,
    };
    use stitchtrack_db::repository::pagination::PageRequest;
    use stitchtrack_db::utils::today_iso;

    #[tokio::test]
    async fn test_create_with_only_customer_uses_defaults() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let item = lifecycle.create_item(CreateItemRequest::for_customer("J. Smith")).await?;
        assert_eq!(item.status, ItemStatus::Ordered);
        assert_eq!(item.payment_status, PaymentStatus::Unpaid);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.age_group, AgeGroup::Adult);

        let history = lifecycle.history_for(&item.id).await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].old_status, None);
        assert_eq!(history[0].new_status, ItemStatus::Ordered);
        assert_eq!(history[0].note.as_deref(), Some("Created"));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_normalizes_size_and_dates() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let request = CreateItemRequest {
            size: "ym".to_string(),
            date_ordered: Some("1/5/2025".to_string()),
            date_invoiced: Some("  ".to_string()),
            status: Some(ItemStatus::Received),
            ..CreateItemRequest::for_customer("  Youth Team  ")
        };
        let item = lifecycle.create_item(request).await?;

        assert_eq!(item.size, "M");
        assert_eq!(item.age_group, AgeGroup::Youth);
        assert_eq!(item.customer_name, "Youth Team");
        assert_eq!(item.date_ordered.as_deref(), Some("2025-01-05"));
        assert_eq!(item.date_invoiced, None);

        let history = lifecycle.history_for(&item.id).await?;
        assert_eq!(history[0].new_status, ItemStatus::Received);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_without_customer_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;

        let err = ctx
            .services
            .lifecycle
            .create_item(CreateItemRequest::for_customer("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::ValidationError(_)));

        let all = ctx.services.queries.query(&Default::default()).await?;
        assert!(all.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_records_history_only_on_status_change() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let item = lifecycle.create_item(CreateItemRequest::for_customer("Editor")).await?;

        let mut edit = item.to_update_request();
        edit.notes = "rush order".to_string();
        let same_status = lifecycle.update_item(&item.id, edit.clone()).await?;
        assert_eq!(same_status.notes, "rush order");
        assert_eq!(lifecycle.history_for(&item.id).await?.len(), 1);

        edit.status = ItemStatus::Inventory;
        edit.location = Some("Warehouse".to_string());
        let moved = lifecycle.update_item(&item.id, edit).await?;

        let history = lifecycle.history_for(&item.id).await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].old_status, Some(ItemStatus::Ordered));
        assert_eq!(history[0].new_status, ItemStatus::Inventory);
        assert_eq!(history[0].location.as_deref(), Some("Warehouse"));
        assert_eq!(history[0].note, None);
        assert_eq!(moved.created_at, item.created_at);
        assert!(moved.updated_at >= item.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_keeps_size_prefix_round_trip() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let request = CreateItemRequest {
            size: "YL".to_string(),
            ..CreateItemRequest::for_customer("Prefix")
        };
        let item = lifecycle.create_item(request).await?;
        let updated = lifecycle.update_item(&item.id, item.to_update_request()).await?;

        assert_eq!(updated.size, "L");
        assert_eq!(updated.age_group, AgeGroup::Youth);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let item = lifecycle.create_item(CreateItemRequest::for_customer("Template")).await?;
        let err = lifecycle
            .update_item("NOTHERE1", item.to_update_request())
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::NotFound(_)));
        assert!(err.is_recoverable());

        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_received_stamps_date_once() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let item = lifecycle.create_item(CreateItemRequest::for_customer("Receiver")).await?;
        let received = lifecycle
            .set_status(&item.id, ItemStatus::Received, None, Some("Box 3".to_string()))
            .await?;
        assert_eq!(received.date_received, Some(today_iso()));

        let mut edit = received.to_update_request();
        edit.date_received = Some("2024-12-24".to_string());
        lifecycle.update_item(&item.id, edit).await?;

        let again = lifecycle.set_status(&item.id, ItemStatus::Received, None, None).await?;
        assert_eq!(again.date_received.as_deref(), Some("2024-12-24"));

        let history = lifecycle.history_for(&item.id).await?;
        // Created, ordered -> received, received -> received
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].old_status, Some(ItemStatus::Received));
        assert_eq!(history[1].note.as_deref(), Some("Box 3"));

        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_location_override() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let request = CreateItemRequest {
            location: Some("Print Shop".to_string()),
            ..CreateItemRequest::for_customer("Mover")
        };
        let item = lifecycle.create_item(request).await?;

        let kept = lifecycle.set_status(&item.id, ItemStatus::Inventory, None, None).await?;
        assert_eq!(kept.location.as_deref(), Some("Print Shop"));

        let moved = lifecycle
            .set_status(&item.id, ItemStatus::Delivered, Some("Shipping".to_string()), None)
            .await?;
        assert_eq!(moved.location.as_deref(), Some("Shipping"));

        let history = lifecycle.history_for(&item.id).await?;
        assert_eq!(history[0].location.as_deref(), Some("Shipping"));
        assert_eq!(history[1].location.as_deref(), Some("Print Shop"));

        Ok(())
    }

    #[tokio::test]
    async fn test_created_at_never_changes() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let item = lifecycle.create_item(CreateItemRequest::for_customer("Stable")).await?;
        for status in [ItemStatus::Received, ItemStatus::Inventory, ItemStatus::Delivered] {
            lifecycle.set_status(&item.id, status, None, None).await?;
        }
        let mut edit = lifecycle.get_item(&item.id).await?.to_update_request();
        edit.quantity = 4;
        lifecycle.update_item(&item.id, edit).await?;

        let stored = lifecycle.get_item(&item.id).await?;
        assert_eq!(stored.created_at, item.created_at);
        assert_eq!(stored.quantity, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_payment_status_writes_no_history() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let item = lifecycle.create_item(CreateItemRequest::for_customer("Payer")).await?;
        lifecycle.set_payment_status(&item.id, PaymentStatus::Paid).await?;
        // Any transition is allowed
        lifecycle.set_payment_status(&item.id, PaymentStatus::Invoiced).await?;

        let stored = lifecycle.get_item(&item.id).await?;
        assert_eq!(stored.payment_status, PaymentStatus::Invoiced);
        assert_eq!(stored.status, ItemStatus::Ordered);
        assert_eq!(lifecycle.history_for(&item.id).await?.len(), 1);

        let err = lifecycle
            .set_payment_status("MISSING1", PaymentStatus::Paid)
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::NotFound(_)));

        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_apply_counts_existing_only() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let item = lifecycle.create_item(CreateItemRequest::for_customer("Bulk")).await?;
        let fields = BulkUpdateFields {
            status: Some(ItemStatus::Delivered),
            tracking_number: Some("1Z999".to_string()),
            ..Default::default()
        };
        let count = lifecycle
            .bulk_apply(&[item.id.as_str(), "MISSING1"], fields)
            .await?;
        assert_eq!(count, 1);

        let stored = lifecycle.get_item(&item.id).await?;
        assert_eq!(stored.status, ItemStatus::Delivered);
        assert_eq!(stored.tracking_number, "1Z999");
        // Default policy skips per-item history
        assert_eq!(lifecycle.history_for(&item.id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_apply_record_policy_logs_changes() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let config = StoreConfig {
            bulk_history: BulkHistoryPolicy::Record,
            ..StoreConfig::in_memory()
        };
        let ctx = setup_service_context_with(config).await?;
        let lifecycle = &ctx.services.lifecycle;

        let ordered = lifecycle.create_item(CreateItemRequest::for_customer("Ordered")).await?;
        let request = CreateItemRequest {
            status: Some(ItemStatus::Delivered),
            ..CreateItemRequest::for_customer("Already delivered")
        };
        let delivered = lifecycle.create_item(request).await?;

        let fields = BulkUpdateFields {
            status: Some(ItemStatus::Delivered),
            ..Default::default()
        };
        lifecycle.bulk_apply(&[ordered.id.clone(), delivered.id.clone()], fields).await?;

        let history = lifecycle.history_for(&ordered.id).await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].note.as_deref(), Some("Bulk update"));
        assert_eq!(history[0].old_status, Some(ItemStatus::Ordered));
        // Unchanged status, no entry
        assert_eq!(lifecycle.history_for(&delivered.id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_repeated_ids_count_once() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let config = StoreConfig {
            bulk_history: BulkHistoryPolicy::Record,
            ..StoreConfig::in_memory()
        };
        let ctx = setup_service_context_with(config).await?;
        let lifecycle = &ctx.services.lifecycle;

        let item = lifecycle.create_item(CreateItemRequest::for_customer("Twice")).await?;
        let fields = BulkUpdateFields {
            status: Some(ItemStatus::Delivered),
            ..Default::default()
        };
        let count = lifecycle.bulk_apply(&[item.id.clone(), item.id.clone()], fields).await?;
        assert_eq!(count, 1);

        let history = lifecycle.history_for(&item.id).await?;
        assert_eq!(history.len(), 2);
        let bulk_entries = history
            .iter()
            .filter(|entry| entry.note.as_deref() == Some("Bulk update"))
            .count();
        assert_eq!(bulk_entries, 1);

        let removed = lifecycle.bulk_delete(&[item.id.clone(), item.id.clone()]).await?;
        assert_eq!(removed, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_apply_normalizes_delivery_date() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let item = lifecycle.create_item(CreateItemRequest::for_customer("Dated")).await?;
        let fields = BulkUpdateFields {
            date_delivered: Some("1/5/2025".to_string()),
            ..Default::default()
        };
        assert_eq!(lifecycle.bulk_apply(&[item.id.as_str()], fields).await?, 1);

        let stored = lifecycle.get_item(&item.id).await?;
        assert_eq!(stored.date_delivered.as_deref(), Some("2025-01-05"));

        // A blank date leaves nothing to apply
        let blank = BulkUpdateFields {
            date_delivered: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(lifecycle.bulk_apply(&[item.id.as_str()], blank).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_history_write_rolls_back_item() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let item = lifecycle.create_item(CreateItemRequest::for_customer("Atomic")).await?;
        sqlx::query("ALTER TABLE status_history RENAME TO status_history_moved")
            .execute(ctx.store.pool())
            .await?;

        let result = lifecycle.set_status(&item.id, ItemStatus::Received, None, None).await;
        assert!(matches!(result, Err(InventoryError::DatabaseError(_))));

        let stored = lifecycle.get_item(&item.id).await?;
        assert_eq!(stored.status, ItemStatus::Ordered);
        assert_eq!(stored.date_received, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_item_and_bulk_delete() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let first = lifecycle.create_item(CreateItemRequest::for_customer("First")).await?;
        let second = lifecycle.create_item(CreateItemRequest::for_customer("Second")).await?;
        let third = lifecycle.create_item(CreateItemRequest::for_customer("Third")).await?;

        lifecycle.delete_item(&first.id).await?;
        assert!(matches!(lifecycle.get_item(&first.id).await, Err(InventoryError::NotFound(_))));
        assert!(lifecycle.history_for(&first.id).await?.is_empty());
        assert!(matches!(
            lifecycle.delete_item(&first.id).await,
            Err(InventoryError::NotFound(_))
        ));

        let removed = lifecycle
            .bulk_delete(&[second.id.as_str(), "MISSING1", first.id.as_str()])
            .await?;
        assert_eq!(removed, 1);
        assert_eq!(lifecycle.history_for(&third.id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_history_page() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_service_context().await?;
        let lifecycle = &ctx.services.lifecycle;

        let item = lifecycle.create_item(CreateItemRequest::for_customer("Pager")).await?;
        lifecycle.set_status(&item.id, ItemStatus::Received, None, None).await?;
        lifecycle.set_status(&item.id, ItemStatus::Inventory, None, None).await?;

        let page = lifecycle.history_page(&item.id, PageRequest::new(2, 0)).await?;
        assert_eq!(page.total, 3);
        assert_eq!(page.items[0].new_status, ItemStatus::Inventory);
        assert!(page.has_more());

        Ok(())
    }
}
