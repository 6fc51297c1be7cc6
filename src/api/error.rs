// ==========================================
// Cheptel - API layer error types
// ==========================================
// Responsibility: translate repository errors into user-facing business
// errors, and reject invalid order input before it reaches the engines
// Rule: every variant is recoverable at the call site; nothing here should
// abort an otherwise-valid order
// ==========================================

use crate::domain::types::SexCategory;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API layer errors
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Order construction errors
    // ==========================================
    /// Quantity must be a strictly positive integer.
    #[error("invalid quantity: {quantity}")]
    InvalidQuantity { quantity: u32 },

    /// One (race, sex) pair per order.
    #[error("selection already present: race={race}, sex={sex}")]
    DuplicateSelection { race: String, sex: SexCategory },

    /// No active lot offers the requested race; must stay visible to the
    /// user, never silently priced at zero.
    #[error("no matching lot for race={race}")]
    NoMatchingLot { race: String },

    // ==========================================
    // Business rule errors
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("data validation failed: {0}")]
    ValidationError(String),

    // ==========================================
    // Data access errors
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // Generic
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// Conversion from RepositoryError
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{entity} (id={id}) does not exist"))
            }
            RepositoryError::DatabaseConnectionError(msg) => {
                ApiError::DatabaseConnectionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("lock acquisition failed: {msg}"))
            }
            RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg)
            | RepositoryError::ForeignKeyViolation(msg) => ApiError::DatabaseError(msg),
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("field {field}: {message}"))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result type alias
pub type ApiResult<T> = Result<T, ApiError>;
