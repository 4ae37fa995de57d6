//! Spreadsheet import.
//!
//! Each data row becomes one item through the regular create path, with its
//! own write session. A row that cannot be read or created is reported as
//! `Row <n>: <message>` and the batch moves on; `n` counts the header as
//! row 1, matching what a spreadsheet shows.

use std::sync::Arc;

use csv::StringRecord;
use stitchtrack_api::normalize::{normalize_flag, normalize_payment_status, normalize_status};
use stitchtrack_api::{AgeGroup, CreateItemRequest, InventoryError, InventoryResult};
use tracing::{info, instrument, warn};

use super::columns::{ColumnMap, Field};
use super::lifecycle::LifecycleController;

pub const IMPORTED_NOTE: &str = "Imported from CSV";

/// Outcome of one import batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    /// Every row error, in row order
    pub errors: Vec<String>,
    max_reported: usize,
}

impl ImportSummary {
    /// The leading errors worth showing to a person.
    pub fn reported_errors(&self) -> &[String] {
        &self.errors[..self.errors.len().min(self.max_reported)]
    }

    /// Errors left out of [`ImportSummary::reported_errors`].
    pub fn unreported_error_count(&self) -> usize {
        self.errors.len().saturating_sub(self.max_reported)
    }
}

pub struct IngestionPipeline {
    lifecycle: Arc<LifecycleController>,
    max_reported_errors: usize,
}

impl IngestionPipeline {
    pub fn new(lifecycle: Arc<LifecycleController>, max_reported_errors: usize) -> Self {
        Self {
            lifecycle,
            max_reported_errors,
        }
    }

    /// Imports comma-separated text with a header row.
    ///
    /// Only an unreadable header row fails the whole batch.
    #[instrument(skip(self, text), fields(bytes = text.len()))]
    pub async fn import_batch(&self, text: &str) -> InventoryResult<ImportSummary> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());
        let columns = ColumnMap::resolve(
            reader
                .headers()
                .map_err(|err| InventoryError::ValidationError(format!("Unreadable header row: {err}")))?,
        );

        let mut summary = ImportSummary {
            max_reported: self.max_reported_errors,
            ..Default::default()
        };
        for (index, record) in reader.records().enumerate() {
            let row = index + 2;
            let outcome = match record {
                Ok(record) => self.import_row(&columns, &record).await,
                Err(err) => Err(err.to_string()),
            };
            match outcome {
                Ok(()) => summary.imported += 1,
                Err(message) => {
                    warn!(row, error = %message, "skipped import row");
                    summary.errors.push(format!("Row {row}: {message}"));
                }
            }
        }

        info!(
            imported = summary.imported,
            failed = summary.errors.len(),
            "import finished"
        );
        Ok(summary)
    }

    async fn import_row(&self, columns: &ColumnMap, record: &StringRecord) -> Result<(), String> {
        let request = request_from_row(columns, record)?;
        self.lifecycle
            .create_item_with_note(request, IMPORTED_NOTE)
            .await
            .map(|_| ())
            .map_err(|err| err.to_string())
    }
}

/// Maps one row onto a create request. Size, dates and location are
/// normalized further down the create path.
fn request_from_row(columns: &ColumnMap, record: &StringRecord) -> Result<CreateItemRequest, String> {
    let quantity = columns
        .optional(record, Field::Quantity)
        .map(|raw| {
            raw.parse::<i64>()
                .map_err(|_| format!("invalid quantity '{raw}'"))
        })
        .transpose()?;
    let text = |field| columns.value(record, field).to_string();
    let optional = |field| columns.optional(record, field).map(str::to_string);

    Ok(CreateItemRequest {
        quantity,
        item_type: text(Field::ItemType),
        color: text(Field::Color),
        design: text(Field::Design),
        customer_name: text(Field::CustomerName),
        team: text(Field::Team),
        number: text(Field::Number),
        size: text(Field::Size),
        // An explicit age column wins over the size prefix
        age_group: columns
            .optional(record, Field::AgeGroup)
            .and_then(|raw| raw.parse::<AgeGroup>().ok()),
        name_bar: text(Field::NameBar),
        chest_logo: text(Field::ChestLogo),
        notes: text(Field::Notes),
        date_ordered: optional(Field::DateOrdered),
        date_invoiced: optional(Field::DateInvoiced),
        date_received: optional(Field::DateReceived),
        date_delivered: optional(Field::DateDelivered),
        status: Some(normalize_status(columns.value(record, Field::Status))),
        payment_status: Some(normalize_payment_status(columns.value(record, Field::PaymentStatus))),
        needs_remake: normalize_flag(columns.value(record, Field::NeedsRemake)),
        tracking_number: text(Field::TrackingNumber),
        location: optional(Field::Location),
    })
}
