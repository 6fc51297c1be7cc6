// ==========================================
// Cheptel - SQLite connection setup
// ==========================================
// Goals:
// - one place for Connection::open PRAGMA behavior, so every module gets
//   foreign keys and the same busy timeout
// - idempotent schema initialization stamped in schema_version
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Schema version the code expects. Bump together with `init_schema`.
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Apply the uniform PRAGMAs to a connection.
///
/// foreign_keys and busy_timeout are per-connection settings, so this must
/// run for every connection the crate opens.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the uniform configuration applied.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create every table the crate uses. Safe to call on an existing database.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS lots (
            id TEXT PRIMARY KEY,
            species_key TEXT NOT NULL,
            reference_date TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            egg_count INTEGER,
            hatched_count INTEGER,
            success_rate_percent REAL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS lot_allocations (
            lot_id TEXT NOT NULL REFERENCES lots(id) ON DELETE CASCADE,
            race TEXT NOT NULL,
            males INTEGER NOT NULL DEFAULT 0 CHECK (males >= 0),
            females INTEGER NOT NULL DEFAULT 0 CHECK (females >= 0),
            PRIMARY KEY (lot_id, race)
        );

        CREATE TABLE IF NOT EXISTS pricing_entries (
            species_key TEXT NOT NULL,
            position INTEGER NOT NULL,
            age_months REAL NOT NULL CHECK (age_months >= 0),
            sex TEXT NOT NULL,
            price REAL NOT NULL CHECK (price >= 0),
            PRIMARY KEY (species_key, position)
        );

        CREATE TABLE IF NOT EXISTS orders (
            id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            delivery_date TEXT,
            suggested_collection_date TEXT,
            grand_total REAL NOT NULL,
            payload TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS order_lines (
            order_id TEXT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            line_no INTEGER NOT NULL,
            race TEXT NOT NULL,
            species_key TEXT NOT NULL,
            sex TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            desired_age_months INTEGER NOT NULL,
            desired_age_weeks INTEGER NOT NULL,
            lot_id TEXT,
            unit_price REAL,
            line_total REAL NOT NULL,
            PRIMARY KEY (order_id, line_no)
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// Read the schema version (None when the table does not exist yet).
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })?;
    Ok(v)
}

/// Default database location under the platform data directory.
pub fn default_db_path() -> String {
    let mut dir = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    dir.push("cheptel");
    let _ = std::fs::create_dir_all(&dir);
    dir.push("cheptel.db");
    dir.to_string_lossy().to_string()
}
