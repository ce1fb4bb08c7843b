use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] turso::Error),

    #[error("Type conversion error: expected {expected}, got {actual}")]
    TypeConversion { expected: &'static str, actual: String },

    #[error("Unexpected null value for non-nullable field")]
    UnexpectedNull,

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Expected at most one row, query matched several")]
    NonUniqueResult,

    #[error("No rows affected")]
    NoRowsAffected,

    #[error("Primary key must be set for update operation")]
    PrimaryKeyNotSet,

    #[error("Query error: {0}")]
    Query(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
