// ==========================================
// Cheptel - Data repository layer
// ==========================================
// Responsibility: data access behind the engine, hiding database details
// Rule: repositories contain no business logic; all queries parameterized
// ==========================================

pub mod error;
pub mod lot_repo;
pub mod order_repo;
pub mod pricing_repo;

// Re-export the core repositories
pub use error::{RepositoryError, RepositoryResult};
pub use lot_repo::LotRepository;
pub use order_repo::OrderRepository;
pub use pricing_repo::PricingRepository;

use chrono::{DateTime, NaiveDate, Utc};

// Column parsing helpers shared by the repositories. Stored values are
// written by this crate, so a malformed cell means a corrupted database;
// fall back to epoch rather than poisoning every read with a Result.
pub(crate) fn parse_naive_date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .unwrap_or_else(|_| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
}

pub(crate) fn parse_utc_datetime(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH)
}
