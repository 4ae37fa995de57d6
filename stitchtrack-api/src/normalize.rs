//! Tolerant conversion of free-form spreadsheet and form tokens into
//! canonical field values.
//!
//! Every function here is total: unrecognised input is coerced or passed
//! through, never rejected.

use crate::domain::status::{AgeGroup, ItemStatus, PaymentStatus};

/// Splits an age-group prefix off a garment size.
///
/// The input is trimmed and upper-cased. A leading `Y` means youth and a
/// leading `A` means adult; the prefix letter is removed from the stored
/// size. Anything else is adult and kept verbatim.
///
/// A garment whose real size starts with `A` or `Y` cannot be told apart
/// from a prefixed size, so `"AL"` always reads as adult `"L"`.
///
/// # Example
/// ```
/// use stitchtrack_api::normalize::normalize_size;
/// use stitchtrack_api::AgeGroup;
///
/// assert_eq!(normalize_size("ym"), ("M".to_string(), AgeGroup::Youth));
/// assert_eq!(normalize_size("XL"), ("XL".to_string(), AgeGroup::Adult));
/// ```
pub fn normalize_size(raw: &str) -> (String, AgeGroup) {
    let size = raw.trim().to_uppercase();
    if let Some(rest) = size.strip_prefix('Y') {
        (rest.to_string(), AgeGroup::Youth)
    } else if let Some(rest) = size.strip_prefix('A') {
        (rest.to_string(), AgeGroup::Adult)
    } else {
        (size, AgeGroup::Adult)
    }
}

/// Rewrites `M/D/YYYY` (or zero-padded `MM/DD/YYYY`) to `YYYY-MM-DD`.
///
/// Anything else, including already-ISO dates and malformed text, comes
/// back trimmed but otherwise untouched. Month and day ranges are not
/// checked.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let parts: Vec<&str> = trimmed.split('/').collect();
    if let [month, day, year] = parts.as_slice() {
        fn is_digits(s: &str) -> bool {
            !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
        }
        if is_digits(month)
            && month.len() <= 2
            && is_digits(day)
            && day.len() <= 2
            && is_digits(year)
            && year.len() == 4
        {
            return format!("{year}-{month:0>2}-{day:0>2}");
        }
    }
    trimmed.to_string()
}

/// Normalizes a date field that may be absent: blank input becomes `None`.
pub fn normalize_optional_date(raw: Option<&str>) -> Option<String> {
    raw.map(normalize_date).filter(|date| !date.is_empty())
}

/// Lower-cases and trims a status token, coercing unknown values to `ordered`.
pub fn normalize_status(raw: &str) -> ItemStatus {
    raw.trim()
        .to_lowercase()
        .parse()
        .unwrap_or(ItemStatus::Ordered)
}

/// Same as [`normalize_status`] for payment tokens; unknown values become
/// `unpaid`. Spaces are accepted in place of underscores (`"not required"`).
pub fn normalize_payment_status(raw: &str) -> PaymentStatus {
    raw.trim()
        .to_lowercase()
        .replace(' ', "_")
        .parse()
        .unwrap_or(PaymentStatus::Unpaid)
}

/// Reads spreadsheet-style booleans (`yes`, `y`, `true`, `1`, `x`).
pub fn normalize_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "yes" | "y" | "true" | "1" | "x"
    )
}

/// Trims free text and maps blank input to `None`.
pub fn normalize_optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
