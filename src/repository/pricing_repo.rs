// ==========================================
// Cheptel - Pricing repository
// ==========================================
// Responsibility: CRUD over the pricing_entries table
// Rule: the stored position column preserves grid order, because the
// nearest-age tie-break depends on it
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::pricing::{PricingEntry, PricingTable};
use crate::domain::types::SexCategory;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// PricingRepository
// ==========================================
pub struct PricingRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PricingRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Replace the whole grid of one species, keeping entry order.
    pub fn replace_table(&self, table: &PricingTable) -> RepositoryResult<usize> {
        for entry in &table.entries {
            if entry.age_months < 0.0 || !entry.age_months.is_finite() {
                return Err(RepositoryError::FieldValueError {
                    field: "age_months".to_string(),
                    message: format!("invalid value {}", entry.age_months),
                });
            }
            if entry.price < 0.0 || !entry.price.is_finite() {
                return Err(RepositoryError::FieldValueError {
                    field: "price".to_string(),
                    message: format!("invalid value {}", entry.price),
                });
            }
        }

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM pricing_entries WHERE species_key = ?1",
            params![table.species_key],
        )?;
        for (position, entry) in table.entries.iter().enumerate() {
            tx.execute(
                r#"
                INSERT INTO pricing_entries (species_key, position, age_months, sex, price)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    table.species_key,
                    position as i64,
                    entry.age_months,
                    entry.sex.to_string(),
                    entry.price,
                ],
            )?;
        }
        tx.commit()?;
        Ok(table.entries.len())
    }

    /// Grid for one species in stored order. None when the species has no
    /// entries at all — callers report that as missing pricing.
    pub fn get_table(&self, species_key: &str) -> RepositoryResult<Option<PricingTable>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT age_months, sex, price
            FROM pricing_entries
            WHERE species_key = ?1
            ORDER BY position
            "#,
        )?;
        let rows = stmt.query_map(params![species_key], |row| {
            Ok((
                row.get::<_, f64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (age_months, sex_raw, price) = row?;
            let sex = SexCategory::parse(&sex_raw).ok_or_else(|| {
                RepositoryError::FieldValueError {
                    field: "sex".to_string(),
                    message: format!("unknown category '{sex_raw}'"),
                }
            })?;
            entries.push(PricingEntry::new(age_months, sex, price));
        }

        if entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(PricingTable::new(species_key, entries)))
    }

    /// Species that currently have at least one pricing entry.
    pub fn list_species(&self) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT species_key FROM pricing_entries ORDER BY species_key",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut species = Vec::new();
        for row in rows {
            species.push(row?);
        }
        Ok(species)
    }
}
