use chrono::Local;
use rand::distributions::Uniform;
use rand::Rng;
use std::str::FromStr;

use crate::models::inventory::ItemId;

/// Length of generated item ids.
pub const ITEM_ID_LEN: usize = 8;

/// Unambiguous upper-case alphabet: no `0`/`O` or `1`/`I`, so ids survive
/// being read off a printed label.
const ITEM_ID_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Generates a random item id.
///
/// Uniqueness is not guaranteed here; the item repository checks the table
/// and retries on collision.
pub fn generate_item_id() -> ItemId {
    let mut rng = rand::thread_rng();
    let alphabet = Uniform::from(0..ITEM_ID_ALPHABET.len());
    let mut id = ItemId::new();
    for _ in 0..ITEM_ID_LEN {
        let c = ITEM_ID_ALPHABET[rng.sample(alphabet)] as char;
        // ITEM_ID_LEN is below the id capacity
        let _ = id.push(c);
    }
    id
}

/// Parses an externally supplied id (URL segment, form field, label scan).
///
/// Returns `None` when the value cannot be a stored id.
pub fn parse_item_id(raw: &str) -> Option<ItemId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    ItemId::from_str(trimmed).ok()
}

/// Today's local date as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
