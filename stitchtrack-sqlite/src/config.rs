use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

/// Locations seeded into an empty registry on first initialization.
pub const DEFAULT_SEED_LOCATIONS: &[(&str, &str)] = &[
    ("Warehouse", "Main stock room"),
    ("Print Shop", "Awaiting decoration"),
    ("Front Office", "Ready for customer pickup"),
    ("Shipping", "Packed for delivery"),
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Whether bulk status changes write per-item history entries.
///
/// The single-item path always records a transition. Bulk updates do not by
/// default; `Record` writes one entry (note `"Bulk update"`) per item whose
/// status actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkHistoryPolicy {
    #[default]
    Skip,
    Record,
}

impl FromStr for BulkHistoryPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(BulkHistoryPolicy::Skip),
            "record" => Ok(BulkHistoryPolicy::Record),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Base of the public lookup URL encoded on printed labels
    pub public_base_url: String,
    pub seed_locations: Vec<(String, String)>,
    pub bulk_history: BulkHistoryPolicy,
    pub max_reported_import_errors: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://stitchtrack.db?mode=rwc".to_string(),
            max_connections: 5,
            acquire_timeout_secs: 30,
            public_base_url: "http://localhost:8000".to_string(),
            seed_locations: DEFAULT_SEED_LOCATIONS
                .iter()
                .map(|(name, description)| (name.to_string(), description.to_string()))
                .collect(),
            bulk_history: BulkHistoryPolicy::Skip,
            max_reported_import_errors: 10,
        }
    }
}

impl StoreConfig {
    /// Private in-memory database, used by tests.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            ..Self::default()
        }
    }

    /// Defaults overlaid with `DATABASE_URL`, `STITCHTRACK_BASE_URL`,
    /// `STITCHTRACK_MAX_CONNECTIONS` and `STITCHTRACK_BULK_HISTORY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(base) = lookup("STITCHTRACK_BASE_URL") {
            config.public_base_url = base;
        }
        if let Some(raw) = lookup("STITCHTRACK_MAX_CONNECTIONS") {
            config.max_connections = raw
                .trim()
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "STITCHTRACK_MAX_CONNECTIONS",
                    value: raw.clone(),
                })?;
        }
        if let Some(raw) = lookup("STITCHTRACK_BULK_HISTORY") {
            config.bulk_history = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "STITCHTRACK_BULK_HISTORY",
                value: raw.clone(),
            })?;
        }
        Ok(config)
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }

    /// Pool size actually used; an in-memory database lives on one connection.
    pub fn effective_max_connections(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            self.max_connections.max(1)
        }
    }
}
