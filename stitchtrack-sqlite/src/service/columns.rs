//! Spreadsheet header aliases for every importable item field.
//!
//! Each alias list is ordered: the first alias found in a header row wins,
//! and the first alias of each list is the header written on export.
//!
//! # Usage
//!
//! ```ignore
//! use crate::service::columns::{ColumnMap, Field};
//!
//! let map = ColumnMap::resolve(reader.headers()?);
//! let number = map.value(&record, Field::Number);
//! ```

use csv::StringRecord;
use std::collections::HashMap;

pub mod aliases {
    pub const QUANTITY: &[&str] = &["QTY", "Qty", "qty", "QUANTITY", "Quantity", "quantity"];
    pub const ITEM_TYPE: &[&str] = &["TYPE", "Type", "type", "ITEM TYPE", "Item Type", "item_type"];
    pub const COLOR: &[&str] = &["COLOR", "Color", "color", "COLOUR", "Colour"];
    pub const DESIGN: &[&str] = &["DESIGN", "Design", "design"];
    pub const CUSTOMER_NAME: &[&str] = &[
        "CUSTOMER NAME",
        "Customer Name",
        "CUSTOMER",
        "Customer",
        "customer_name",
        "customer",
    ];
    pub const TEAM: &[&str] = &["TEAM", "Team", "team"];
    pub const NUMBER: &[&str] = &[
        "NUMBER",
        "Number",
        "#",
        "NO.",
        "No.",
        "JERSEY #",
        "Jersey #",
        "JERSEY NUMBER",
        "Jersey Number",
        "number",
    ];
    pub const SIZE: &[&str] = &["SIZE", "Size", "size"];
    pub const AGE_GROUP: &[&str] = &["AGE", "Age", "AGE GROUP", "Age Group", "age_group"];
    pub const NAME_BAR: &[&str] = &["NAME BAR", "Name Bar", "NAMEBAR", "Namebar", "NameBar", "name_bar"];
    pub const CHEST_LOGO: &[&str] = &["CHEST LOGO", "Chest Logo", "chest_logo"];
    pub const NOTES: &[&str] = &["NOTES", "Notes", "NOTE", "Note", "notes"];
    pub const DATE_ORDERED: &[&str] = &["DATE ORDERED", "Date Ordered", "ORDERED", "Ordered", "date_ordered"];
    pub const DATE_INVOICED: &[&str] = &["DATE INVOICED", "Date Invoiced", "INVOICED", "Invoiced", "date_invoiced"];
    pub const DATE_RECEIVED: &[&str] = &["DATE RECEIVED", "Date Received", "RECEIVED", "Received", "date_received"];
    pub const DATE_DELIVERED: &[&str] = &["DATE DELIVERED", "Date Delivered", "DELIVERED", "Delivered", "date_delivered"];
    pub const STATUS: &[&str] = &["STATUS", "Status", "status"];
    pub const PAYMENT_STATUS: &[&str] = &["PAYMENT", "Payment", "PAYMENT STATUS", "Payment Status", "payment_status"];
    pub const LOCATION: &[&str] = &["LOCATION", "Location", "location"];
    pub const TRACKING_NUMBER: &[&str] = &["TRACKING", "Tracking", "TRACKING NUMBER", "Tracking Number", "tracking_number"];
    pub const NEEDS_REMAKE: &[&str] = &["REMAKE", "Remake", "NEEDS REMAKE", "Needs Remake", "needs_remake"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Quantity,
    ItemType,
    Color,
    Design,
    CustomerName,
    Team,
    Number,
    Size,
    AgeGroup,
    NameBar,
    ChestLogo,
    Notes,
    DateOrdered,
    DateInvoiced,
    DateReceived,
    DateDelivered,
    Status,
    PaymentStatus,
    Location,
    TrackingNumber,
    NeedsRemake,
}

impl Field {
    /// Export column order.
    pub const ALL: [Field; 21] = [
        Field::Quantity,
        Field::ItemType,
        Field::Color,
        Field::Design,
        Field::CustomerName,
        Field::Team,
        Field::Number,
        Field::Size,
        Field::AgeGroup,
        Field::NameBar,
        Field::ChestLogo,
        Field::Notes,
        Field::DateOrdered,
        Field::DateInvoiced,
        Field::DateReceived,
        Field::DateDelivered,
        Field::Status,
        Field::PaymentStatus,
        Field::Location,
        Field::TrackingNumber,
        Field::NeedsRemake,
    ];

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Quantity => aliases::QUANTITY,
            Field::ItemType => aliases::ITEM_TYPE,
            Field::Color => aliases::COLOR,
            Field::Design => aliases::DESIGN,
            Field::CustomerName => aliases::CUSTOMER_NAME,
            Field::Team => aliases::TEAM,
            Field::Number => aliases::NUMBER,
            Field::Size => aliases::SIZE,
            Field::AgeGroup => aliases::AGE_GROUP,
            Field::NameBar => aliases::NAME_BAR,
            Field::ChestLogo => aliases::CHEST_LOGO,
            Field::Notes => aliases::NOTES,
            Field::DateOrdered => aliases::DATE_ORDERED,
            Field::DateInvoiced => aliases::DATE_INVOICED,
            Field::DateReceived => aliases::DATE_RECEIVED,
            Field::DateDelivered => aliases::DATE_DELIVERED,
            Field::Status => aliases::STATUS,
            Field::PaymentStatus => aliases::PAYMENT_STATUS,
            Field::Location => aliases::LOCATION,
            Field::TrackingNumber => aliases::TRACKING_NUMBER,
            Field::NeedsRemake => aliases::NEEDS_REMAKE,
        }
    }

    pub fn canonical_header(&self) -> &'static str {
        self.aliases()[0]
    }
}

/// Header position of each field present in one input table.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    positions: HashMap<Field, usize>,
}

impl ColumnMap {
    /// Resolves every field against a header row. Headers are compared
    /// trimmed, with a leading byte-order mark ignored.
    pub fn resolve(headers: &StringRecord) -> Self {
        let headers: Vec<&str> = headers
            .iter()
            .map(|header| header.trim_start_matches('\u{feff}').trim())
            .collect();

        let mut positions = HashMap::new();
        for field in Field::ALL {
            let found = field
                .aliases()
                .iter()
                .find_map(|alias| headers.iter().position(|header| header == alias));
            if let Some(position) = found {
                positions.insert(field, position);
            }
        }
        Self { positions }
    }

    /// Trimmed cell for `field`; empty when the column or the cell is missing.
    pub fn value<'r>(&self, record: &'r StringRecord, field: Field) -> &'r str {
        self.positions
            .get(&field)
            .and_then(|position| record.get(*position))
            .map(str::trim)
            .unwrap_or("")
    }

    /// Like [`ColumnMap::value`], but `None` for absent or blank cells.
    pub fn optional<'r>(&self, record: &'r StringRecord, field: Field) -> Option<&'r str> {
        Some(self.value(record, field)).filter(|value| !value.is_empty())
    }
}
