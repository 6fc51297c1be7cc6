// ==========================================
// Cheptel - Order repository
// ==========================================
// Responsibility: persist submitted orders and read them back
// Storage: scalar columns for querying (orders/order_lines) plus the full
// serialized record in orders.payload for lossless reload
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::order::OrderRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// OrderRepository
// ==========================================
pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepository {
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

    /// Persist one submitted order atomically.
    pub fn save_order(&self, order: &OrderRecord) -> RepositoryResult<()> {
        let payload = serde_json::to_string(order)?;

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        tx.execute(
            r#"
            INSERT INTO orders (
                id, created_at, delivery_date, suggested_collection_date,
                grand_total, payload
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                order.id,
                order.created_at.to_rfc3339(),
                order.delivery_date.map(|d| d.to_string()),
                order.suggested_collection_date.map(|d| d.to_string()),
                order.price_breakdown.grand_total,
                payload,
            ],
        )?;

        for (line_no, pricing) in order.price_breakdown.lines.iter().enumerate() {
            let line = &pricing.line;
            tx.execute(
                r#"
                INSERT INTO order_lines (
                    order_id, line_no, race, species_key, sex, quantity,
                    desired_age_months, desired_age_weeks, lot_id,
                    unit_price, line_total
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
                params![
                    order.id,
                    line_no as i64,
                    line.race,
                    line.species_key,
                    line.sex_preference.to_string(),
                    line.quantity,
                    line.desired_age.months,
                    line.desired_age.weeks,
                    line.bound_lot.as_ref().map(|lot| lot.id.clone()),
                    pricing.unit_price,
                    pricing.line_total,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<OrderRecord>> {
        let conn = self.get_conn()?;
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM orders WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// All orders, most recent first.
    pub fn list_orders(&self) -> RepositoryResult<Vec<OrderRecord>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT payload FROM orders ORDER BY created_at DESC, id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut orders = Vec::new();
        for row in rows {
            orders.push(serde_json::from_str(&row?)?);
        }
        Ok(orders)
    }
}
