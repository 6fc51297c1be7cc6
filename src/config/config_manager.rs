// ==========================================
// Cheptel - Configuration manager
// ==========================================
// Responsibility: load, query and overwrite application settings
// Storage: config_kv table (scope + key + value)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

/// Well-known configuration keys.
pub mod config_keys {
    /// Display locale, "fr" or "en".
    pub const LOCALE: &str = "locale";
    /// Species preselected in availability searches.
    pub const DEFAULT_SPECIES: &str = "default_species";
}

/// Global scope identifier; per-user scopes can be added later without a
/// schema change.
const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Reuse an existing connection. The uniform PRAGMAs are re-applied,
    /// which is idempotent.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Read a global-scope value.
    pub fn get_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a global-scope value (upsert).
    pub fn set_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![GLOBAL_SCOPE, key, value],
        )?;
        Ok(())
    }

    // ==========================================
    // Typed helpers
    // ==========================================

    /// Display locale, defaulting to French.
    pub fn locale(&self) -> RepositoryResult<String> {
        Ok(self
            .get_value(config_keys::LOCALE)?
            .unwrap_or_else(|| "fr".to_string()))
    }

    pub fn set_locale(&self, locale: &str) -> RepositoryResult<()> {
        self.set_value(config_keys::LOCALE, locale)
    }

    pub fn default_species(&self) -> RepositoryResult<Option<String>> {
        self.get_value(config_keys::DEFAULT_SPECIES)
    }
}
