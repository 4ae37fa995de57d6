use std::sync::Arc;

use stitchtrack_api::{InventoryError, InventoryResult, ItemQuery};
use stitchtrack_db::models::inventory::{ItemModel, StatusCountsModel};
use stitchtrack_db::repository::pagination::{Page, PageRequest};
use tracing::{debug, instrument};

use crate::repository::InventoryRepoFactory;
use crate::sqlite_store::Store;

use super::columns::Field;
use super::finish;

/// Read side of the item store: list views, dashboard counts and export.
pub struct ItemQueryService {
    store: Arc<Store>,
    repo_factory: Arc<InventoryRepoFactory>,
}

impl ItemQueryService {
    pub fn new(store: Arc<Store>, repo_factory: Arc<InventoryRepoFactory>) -> Self {
        Self { store, repo_factory }
    }

    pub async fn query(&self, query: &ItemQuery) -> InventoryResult<Vec<ItemModel>> {
        let session = self.store.begin_read().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = repos.item_repository.query(query).await.map_err(InventoryError::from);
        finish(session, result).await
    }

    pub async fn query_page(&self, query: &ItemQuery, page: PageRequest) -> InventoryResult<Page<ItemModel>> {
        let session = self.store.begin_read().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = repos
            .item_repository
            .query_page(query, page)
            .await
            .map_err(InventoryError::from);
        finish(session, result).await
    }

    pub async fn status_counts(&self) -> InventoryResult<StatusCountsModel> {
        let session = self.store.begin_read().await?;
        let repos = self.repo_factory.build_all_repos(&session);
        let result = repos.item_repository.status_counts().await.map_err(InventoryError::from);
        finish(session, result).await
    }

    /// Lookup URL for an item's printed label.
    pub fn public_url(&self, item: &ItemModel) -> String {
        self.store.public_url(&item.id)
    }

    /// Query result as CSV with the canonical import headers, preceded by
    /// an `ID` column that import ignores. Sizes carry their age prefix so
    /// the file imports back to the same items.
    #[instrument(skip(self, query))]
    pub async fn export_csv(&self, query: &ItemQuery) -> InventoryResult<String> {
        let items = self.query(query).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        let mut header = vec!["ID"];
        header.extend(Field::ALL.iter().map(|field| field.canonical_header()));
        writer.write_record(&header).map_err(export_error)?;

        for item in &items {
            let mut record = vec![item.id.to_string()];
            record.extend(Field::ALL.iter().map(|field| export_value(item, *field)));
            writer.write_record(&record).map_err(export_error)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| InventoryError::InternalError(format!("CSV export failed: {err}")))?;
        debug!(rows = items.len(), "exported items");
        String::from_utf8(bytes)
            .map_err(|err| InventoryError::InternalError(format!("CSV export failed: {err}")))
    }
}

fn export_error(err: csv::Error) -> InventoryError {
    InventoryError::InternalError(format!("CSV export failed: {err}"))
}

fn export_value(item: &ItemModel, field: Field) -> String {
    match field {
        Field::Quantity => item.quantity.to_string(),
        Field::ItemType => item.item_type.clone(),
        Field::Color => item.color.clone(),
        Field::Design => item.design.clone(),
        Field::CustomerName => item.customer_name.clone(),
        Field::Team => item.team.clone(),
        Field::Number => item.number.clone(),
        Field::Size => item.prefixed_size(),
        Field::AgeGroup => item.age_group.to_string(),
        Field::NameBar => item.name_bar.clone(),
        Field::ChestLogo => item.chest_logo.clone(),
        Field::Notes => item.notes.clone(),
        Field::DateOrdered => item.date_ordered.clone().unwrap_or_default(),
        Field::DateInvoiced => item.date_invoiced.clone().unwrap_or_default(),
        Field::DateReceived => item.date_received.clone().unwrap_or_default(),
        Field::DateDelivered => item.date_delivered.clone().unwrap_or_default(),
        Field::Status => item.status.to_string(),
        Field::PaymentStatus => item.payment_status.to_string(),
        Field::Location => item.location.clone().unwrap_or_default(),
        Field::TrackingNumber => item.tracking_number.clone(),
        Field::NeedsRemake => if item.needs_remake { "yes" } else { "no" }.to_string(),
    }
}
