//! Schema initialization, additive upgrades and starter data
//!
//! Runs on every startup. Tables are created with `IF NOT EXISTS`, columns
//! introduced after the first release are added when missing, rows that
//! predate those columns are backfilled, and the starter locations are
//! seeded exactly once per database.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

/// Base schema, executed in ascending order
const MIGRATIONS: &[(&str, &str)] = &[
    ("0001_create_items.sql", include_str!("../../migrations/0001_create_items.sql")),
    (
        "0002_create_status_history.sql",
        include_str!("../../migrations/0002_create_status_history.sql"),
    ),
    ("0003_create_locations.sql", include_str!("../../migrations/0003_create_locations.sql")),
];

/// Columns added to `items` after stores were already in use
const ITEM_COLUMN_UPGRADES: &[(&str, &str)] = &[
    ("chest_logo", "TEXT NOT NULL DEFAULT ''"),
    ("date_invoiced", "TEXT"),
    ("payment_status", "TEXT NOT NULL DEFAULT 'unpaid'"),
    ("needs_remake", "INTEGER NOT NULL DEFAULT 0"),
    ("tracking_number", "TEXT NOT NULL DEFAULT ''"),
    ("location", "TEXT"),
];

/// Indexes over upgrade columns, created once those columns exist
const POST_UPGRADE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_items_location ON items (location)",
    "CREATE INDEX IF NOT EXISTS idx_items_payment_status ON items (payment_status)",
];

/// Sane values for rows whose upgraded columns are still NULL
const BACKFILLS: &[&str] = &[
    "UPDATE items SET payment_status = 'unpaid' WHERE payment_status IS NULL OR payment_status = ''",
    "UPDATE items SET needs_remake = 0 WHERE needs_remake IS NULL",
    "UPDATE items SET tracking_number = '' WHERE tracking_number IS NULL",
    "UPDATE items SET chest_logo = '' WHERE chest_logo IS NULL",
    "UPDATE items SET quantity = 1 WHERE quantity IS NULL OR quantity < 1",
];

const LOCATIONS_SEEDED_KEY: &str = "locations_seeded";

/// Initialize the database schema and seed the starter locations
///
/// Safe to call on every startup; repeated calls change nothing.
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::SqlitePool;
/// use stitchtrack_sqlite::repository::db_init::init_database;
///
/// # async fn example(pool: &SqlitePool) -> Result<(), sqlx::Error> {
/// init_database(pool, &[("Warehouse".to_string(), "Main stock room".to_string())]).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(
    pool: &SqlitePool,
    seed_locations: &[(String, String)],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for (name, sql) in MIGRATIONS {
        debug!(migration = name, "applying schema file");
        sqlx::raw_sql(sql).execute(&mut *tx).await?;
    }

    let added = upgrade_item_columns(&mut tx).await?;
    for sql in POST_UPGRADE_INDEXES.iter().chain(BACKFILLS) {
        sqlx::query(sql).execute(&mut *tx).await?;
    }

    let seeded = seed_locations_once(&mut tx, seed_locations).await?;

    tx.commit().await?;
    info!(added_columns = added, seeded_locations = seeded, "database initialized");
    Ok(())
}

/// Adds each missing upgrade column. A "duplicate column" outcome means the
/// column is already there and is ignored.
async fn upgrade_item_columns(tx: &mut Transaction<'static, Sqlite>) -> Result<usize, sqlx::Error> {
    let mut added = 0;
    for (column, definition) in ITEM_COLUMN_UPGRADES {
        let statement = format!("ALTER TABLE items ADD COLUMN {column} {definition}");
        match sqlx::query(&statement).execute(&mut **tx).await {
            Ok(_) => {
                info!(column, "added column to items");
                added += 1;
            }
            Err(err) if is_duplicate_column(&err) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(added)
}

fn is_duplicate_column(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.message().contains("duplicate column name"),
        _ => false,
    }
}

async fn seed_locations_once(
    tx: &mut Transaction<'static, Sqlite>,
    seed_locations: &[(String, String)],
) -> Result<usize, sqlx::Error> {
    let already_seeded: Option<String> =
        sqlx::query_scalar("SELECT value FROM schema_meta WHERE key = ?")
            .bind(LOCATIONS_SEEDED_KEY)
            .fetch_optional(&mut **tx)
            .await?;
    if already_seeded.is_some() {
        return Ok(0);
    }

    let mut seeded = 0;
    for (name, description) in seed_locations {
        let result = sqlx::query("INSERT OR IGNORE INTO locations (name, description) VALUES (?, ?)")
            .bind(name)
            .bind(description)
            .execute(&mut **tx)
            .await?;
        seeded += result.rows_affected() as usize;
    }

    sqlx::query("INSERT INTO schema_meta (key, value) VALUES (?, ?)")
        .bind(LOCATIONS_SEEDED_KEY)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&mut **tx)
        .await?;
    Ok(seeded)
}
