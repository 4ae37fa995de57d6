use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use heapless::String as HeaplessString;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite};
use std::error::Error;
use std::str::FromStr;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &SqliteRow,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::from_str(&s).map_err(|_| {
        format!("Value for column '{col_name}' is too long (max {N} chars)").into()
    })
}

/// Retrieves an optional `HeaplessString` from a row.
pub fn get_optional_heapless_string<const N: usize>(
    row: &SqliteRow,
    col_name: &str,
) -> Result<Option<HeaplessString<N>>, Box<dyn Error + Send + Sync>> {
    let s: Option<String> = row.try_get(col_name)?;
    s.map(|val| HeaplessString::from_str(&val))
        .transpose()
        .map_err(|_| {
            format!("Value for column '{col_name}' is too long (max {N} chars)").into()
        })
}

/// Converts user text into a bounded string, or describes why it does not fit.
pub fn to_heapless<const N: usize>(
    value: &str,
    field: &str,
) -> Result<HeaplessString<N>, String> {
    HeaplessString::from_str(value).map_err(|_| format!("{field} is too long (max {N} chars)"))
}

/// Text columns that were added by later schema upgrades can still hold
/// NULL on rows that predate the backfill; read those as empty.
pub fn get_text_or_empty(row: &SqliteRow, col_name: &str) -> Result<String, sqlx::Error> {
    let s: Option<String> = row.try_get(col_name)?;
    Ok(s.unwrap_or_default())
}

/// True when the error is a UNIQUE / PRIMARY KEY constraint failure.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Escapes `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'` pattern.
pub fn like_contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Current time at the precision timestamps are stored with.
pub fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width UTC timestamp text, so stored timestamps sort correctly as strings.
pub fn timestamp_text(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Pushes `(?, ?, ...)` with one bound value per id.
pub fn push_in_list<'args>(builder: &mut QueryBuilder<'args, Sqlite>, ids: &'args [impl AsRef<str>]) {
    builder.push("(");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(id.as_ref());
    }
    separated.push_unseparated(")");
}
