// ==========================================
// Cheptel - Lot repository
// ==========================================
// Responsibility: CRUD over the lots / lot_allocations tables
// Rule: no business logic here, data access only; availability rules live
// in the engine layer
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::lot::{EstimationInfo, Lot, SexCount};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{parse_naive_date, parse_utc_datetime};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// LotRepository
// ==========================================
pub struct LotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LotRepository {
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

    /// Upsert one lot and replace its race allocations, atomically.
    pub fn save_lot(&self, lot: &Lot) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        Self::write_lot(&tx, lot)?;
        tx.commit()?;
        Ok(())
    }

    /// Batch upsert, one transaction for the whole set.
    pub fn batch_insert_lots(&self, lots: &[Lot]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        for lot in lots {
            Self::write_lot(&tx, lot)?;
        }
        tx.commit()?;
        Ok(lots.len())
    }

    fn write_lot(tx: &rusqlite::Transaction<'_>, lot: &Lot) -> RepositoryResult<()> {
        let (egg_count, hatched_count, success_rate) = match &lot.estimation {
            Some(info) => (
                Some(info.egg_count),
                Some(info.hatched_count),
                Some(info.success_rate_percent),
            ),
            None => (None, None, None),
        };

        tx.execute(
            r#"
            INSERT OR REPLACE INTO lots (
                id, species_key, reference_date, is_active,
                egg_count, hatched_count, success_rate_percent,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                lot.id,
                lot.species_key,
                lot.reference_date.to_string(),
                lot.is_active,
                egg_count,
                hatched_count,
                success_rate,
                lot.created_at.to_rfc3339(),
                lot.updated_at.to_rfc3339(),
            ],
        )?;

        tx.execute(
            "DELETE FROM lot_allocations WHERE lot_id = ?1",
            params![lot.id],
        )?;
        for (race, counts) in &lot.race_allocations {
            tx.execute(
                r#"
                INSERT INTO lot_allocations (lot_id, race, males, females)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![lot.id, race, counts.males, counts.females],
            )?;
        }
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Lot>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                r#"
                SELECT id, species_key, reference_date, is_active,
                       egg_count, hatched_count, success_rate_percent,
                       created_at, updated_at
                FROM lots WHERE id = ?1
                "#,
                params![id],
                Self::map_lot_row,
            )
            .optional()?;

        match row {
            Some(mut lot) => {
                lot.race_allocations = Self::read_allocations(&conn, &lot.id)?;
                Ok(Some(lot))
            }
            None => Ok(None),
        }
    }

    /// Lots in insertion order, optionally filtered by species and activity.
    pub fn list_lots(
        &self,
        species_filter: Option<&str>,
        only_active: bool,
    ) -> RepositoryResult<Vec<Lot>> {
        let conn = self.get_conn()?;
        let mut sql = String::from(
            r#"
            SELECT id, species_key, reference_date, is_active,
                   egg_count, hatched_count, success_rate_percent,
                   created_at, updated_at
            FROM lots
            "#,
        );
        let mut clauses: Vec<&str> = Vec::new();
        if species_filter.is_some() {
            clauses.push("species_key = ?1");
        }
        if only_active {
            clauses.push("is_active = 1");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY rowid");

        let mut stmt = conn.prepare(&sql)?;
        let rows = match species_filter {
            Some(species) => stmt.query_map(params![species], Self::map_lot_row)?,
            None => stmt.query_map([], Self::map_lot_row)?,
        };

        let mut lots = Vec::new();
        for row in rows {
            lots.push(row?);
        }
        drop(stmt);

        for lot in &mut lots {
            lot.race_allocations = Self::read_allocations(&conn, &lot.id)?;
        }
        Ok(lots)
    }

    /// Activate/deactivate a lot without touching its allocations.
    pub fn set_active(&self, id: &str, is_active: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            "UPDATE lots SET is_active = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, is_active],
        )?;
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Lot".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn map_lot_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Lot> {
        let reference_date: String = row.get("reference_date")?;
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;
        let egg_count: Option<u32> = row.get("egg_count")?;
        let hatched_count: Option<u32> = row.get("hatched_count")?;
        let success_rate: Option<f64> = row.get("success_rate_percent")?;

        let estimation = egg_count.map(|eggs| EstimationInfo {
            egg_count: eggs,
            hatched_count: hatched_count.unwrap_or(0),
            success_rate_percent: success_rate.unwrap_or(0.0),
        });

        Ok(Lot {
            id: row.get("id")?,
            species_key: row.get("species_key")?,
            reference_date: parse_naive_date(&reference_date),
            race_allocations: BTreeMap::new(), // filled by the caller
            is_active: row.get("is_active")?,
            estimation,
            created_at: parse_utc_datetime(&created_at),
            updated_at: parse_utc_datetime(&updated_at),
        })
    }

    fn read_allocations(
        conn: &Connection,
        lot_id: &str,
    ) -> RepositoryResult<BTreeMap<String, SexCount>> {
        let mut stmt = conn.prepare(
            "SELECT race, males, females FROM lot_allocations WHERE lot_id = ?1",
        )?;
        let rows = stmt.query_map(params![lot_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                SexCount::new(row.get(1)?, row.get(2)?),
            ))
        })?;

        let mut allocations = BTreeMap::new();
        for row in rows {
            let (race, counts) = row?;
            allocations.insert(race, counts);
        }
        Ok(allocations)
    }
}
