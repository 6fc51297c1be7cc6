// ==========================================
// Cheptel - Import module error types
// ==========================================
// Tool: thiserror derive macro
// ==========================================

use thiserror::Error;

/// Import module errors
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== file errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (only .csv)")]
    UnsupportedFormat(String),

    #[error("CSV parse failure: {0}")]
    CsvParseError(String),

    // ===== data mapping errors =====
    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("type conversion failed (row {row}, field {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("value out of range (row {row}, field {field}): {value}")]
    ValueRangeError {
        row: usize,
        field: String,
        value: f64,
    },

    #[error("unknown sex category (row {row}): '{value}'")]
    UnknownSexCategory { row: usize, value: String },

    #[error("primary key missing (row {0}): species_key is empty")]
    PrimaryKeyMissing(usize),

    // ===== database errors =====
    #[error("database write failed: {0}")]
    DatabaseError(String),
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<crate::repository::error::RepositoryError> for ImportError {
    fn from(err: crate::repository::error::RepositoryError) -> Self {
        ImportError::DatabaseError(err.to_string())
    }
}
