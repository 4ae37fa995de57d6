use serde::{Deserialize, Serialize};
use stitchtrack_api::ItemStatus;

/// Item counts per fulfillment status for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCountsModel {
    /// One entry per status in lifecycle order, zero when unused
    pub by_status: Vec<(ItemStatus, i64)>,
    pub total: i64,
}

impl StatusCountsModel {
    pub fn from_counts(counts: impl IntoIterator<Item = (ItemStatus, i64)>) -> Self {
        let mut by_status: Vec<(ItemStatus, i64)> =
            ItemStatus::ALL.iter().map(|status| (*status, 0)).collect();
        for (status, count) in counts {
            if let Some(entry) = by_status.iter_mut().find(|(s, _)| *s == status) {
                entry.1 += count;
            }
        }
        let total = by_status.iter().map(|(_, count)| count).sum();
        Self { by_status, total }
    }

    pub fn count(&self, status: ItemStatus) -> i64 {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}
