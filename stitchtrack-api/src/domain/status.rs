use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fulfillment stage of an item.
///
/// Stored as its lower-case name (`ordered`, `received`, `inventory`, `delivered`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Ordered,
    Received,
    Inventory,
    Delivered,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Ordered,
        ItemStatus::Received,
        ItemStatus::Inventory,
        ItemStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Ordered => "ordered",
            ItemStatus::Received => "received",
            ItemStatus::Inventory => "inventory",
            ItemStatus::Delivered => "delivered",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Ordered => "Ordered",
            ItemStatus::Received => "Received",
            ItemStatus::Inventory => "In Inventory",
            ItemStatus::Delivered => "Delivered",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            ItemStatus::Ordered => "#f0ad4e",
            ItemStatus::Received => "#5bc0de",
            ItemStatus::Inventory => "#5cb85c",
            ItemStatus::Delivered => "#6c757d",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(ItemStatus::Ordered),
            "received" => Ok(ItemStatus::Received),
            "inventory" => Ok(ItemStatus::Inventory),
            "delivered" => Ok(ItemStatus::Delivered),
            _ => Err(()),
        }
    }
}

/// Billing stage of an item. Any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Invoiced,
    Partial,
    Paid,
    NotRequired,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Unpaid,
        PaymentStatus::Invoiced,
        PaymentStatus::Partial,
        PaymentStatus::Paid,
        PaymentStatus::NotRequired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Invoiced => "invoiced",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
            PaymentStatus::NotRequired => "not_required",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Invoiced => "Invoiced",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::NotRequired => "Not Required",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "#d9534f",
            PaymentStatus::Invoiced => "#f0ad4e",
            PaymentStatus::Partial => "#5bc0de",
            PaymentStatus::Paid => "#5cb85c",
            PaymentStatus::NotRequired => "#6c757d",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "invoiced" => Ok(PaymentStatus::Invoiced),
            "partial" => Ok(PaymentStatus::Partial),
            "paid" => Ok(PaymentStatus::Paid),
            "not_required" => Ok(PaymentStatus::NotRequired),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum AgeGroup {
    #[default]
    Adult,
    Youth,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Adult => "Adult",
            AgeGroup::Youth => "Youth",
        }
    }

    /// Single-letter size prefix that re-derives this age group on import.
    pub fn size_prefix(&self) -> char {
        match self {
            AgeGroup::Adult => 'A',
            AgeGroup::Youth => 'Y',
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adult" | "a" => Ok(AgeGroup::Adult),
            "youth" | "y" => Ok(AgeGroup::Youth),
            _ => Err(()),
        }
    }
}
