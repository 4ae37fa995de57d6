use serde::{Deserialize, Serialize};

use super::status::ItemStatus;

/// One predicate of an item query. Filters combine with AND.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemFilter {
    Status(ItemStatus),
    Location(String),
    /// Substring match over customer name, number, id, name bar and notes.
    Search(String),
}

/// Sortable item columns. Request parameters outside this list fall back
/// to `created_at`, so only these names can ever reach the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortColumn {
    Id,
    Quantity,
    ItemType,
    Design,
    Team,
    Customer,
    Number,
    NameBar,
    AgeGroup,
    Size,
    Color,
    Status,
    Payment,
    DateOrdered,
    #[default]
    CreatedAt,
}

impl SortColumn {
    /// Maps a request parameter (`qty`, `customer`, ...) to a column.
    pub fn from_param(param: &str) -> Self {
        match param.trim() {
            "id" => SortColumn::Id,
            "qty" => SortColumn::Quantity,
            "type" => SortColumn::ItemType,
            "design" => SortColumn::Design,
            "team" => SortColumn::Team,
            "customer" => SortColumn::Customer,
            "number" => SortColumn::Number,
            "namebar" => SortColumn::NameBar,
            "age" => SortColumn::AgeGroup,
            "size" => SortColumn::Size,
            "color" => SortColumn::Color,
            "status" => SortColumn::Status,
            "payment" => SortColumn::Payment,
            "date_ordered" => SortColumn::DateOrdered,
            _ => SortColumn::CreatedAt,
        }
    }

    pub fn column_name(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Quantity => "quantity",
            SortColumn::ItemType => "item_type",
            SortColumn::Design => "design",
            SortColumn::Team => "team",
            SortColumn::Customer => "customer_name",
            SortColumn::Number => "number",
            SortColumn::NameBar => "name_bar",
            SortColumn::AgeGroup => "age_group",
            SortColumn::Size => "size",
            SortColumn::Color => "color",
            SortColumn::Status => "status",
            SortColumn::Payment => "payment_status",
            SortColumn::DateOrdered => "date_ordered",
            SortColumn::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// `asc` (any case) sorts ascending; everything else is descending.
    pub fn from_param(param: &str) -> Self {
        if param.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuery {
    pub filters: Vec<ItemFilter>,
    pub sort: SortColumn,
    pub direction: SortDirection,
}

impl ItemQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a query from raw list-view parameters. Blank values add no filter.
    pub fn from_params(
        status: Option<&str>,
        location: Option<&str>,
        search: Option<&str>,
        sort: Option<&str>,
        direction: Option<&str>,
    ) -> Self {
        let mut query = ItemQuery {
            filters: Vec::new(),
            sort: sort.map(SortColumn::from_param).unwrap_or_default(),
            direction: direction.map(SortDirection::from_param).unwrap_or_default(),
        };
        if let Some(status) = status.map(str::trim).and_then(|s| s.parse().ok()) {
            query.filters.push(ItemFilter::Status(status));
        }
        if let Some(location) = location.map(str::trim).filter(|l| !l.is_empty()) {
            query.filters.push(ItemFilter::Location(location.to_string()));
        }
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query.filters.push(ItemFilter::Search(search.to_string()));
        }
        query
    }

    pub fn with_filter(mut self, filter: ItemFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sorted_by(mut self, sort: SortColumn, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }
}
