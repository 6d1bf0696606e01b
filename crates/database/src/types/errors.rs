//! Error types for the persistence layer.

use thiserror::Error;

/// Store-level errors shared by the repositories
#[derive(Debug, Error, Clone)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("email already exists")]
    EmailAlreadyExists,

    #[error("database error: {0}")]
    Database(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db_err) => {
                if db_err.message().contains("UNIQUE constraint failed")
                    && db_err.message().contains("email")
                {
                    StoreError::EmailAlreadyExists
                } else {
                    StoreError::Database(db_err.message().to_string())
                }
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}
