//! BookSwap Database Crate
//!
//! Connection management, migrations, entity definitions, and the
//! repositories backing the BookSwap API.

use bookswap_config::DatabaseConfig;
use sqlx::SqlitePool;
use thiserror::Error;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use repos::{BookRepository, RequestRepository, UserRepository};

pub use entities::{
    book::{Book, BookStatus, BookUpdate, BookWithOwner, NewBook, OwnerSummary},
    request::{IncomingRequest, NewRequest, SwapRequest},
    user::{NewUser, User},
};

pub use types::{StoreError, StoreResult};

#[derive(Debug, Error)]
pub enum InitError {
    #[error("database connection failed: {0}")]
    Connection(String),
    #[error("database migration failed: {0}")]
    Migration(String),
}

/// Connect to the configured database and bring the schema up to date.
pub async fn initialize_database(config: &DatabaseConfig) -> Result<SqlitePool, InitError> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| InitError::Connection(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| InitError::Migration(e.to_string()))?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn initialize_database_runs_migrations() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("bookswap-test.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
        };

        let pool = initialize_database(&config).await.unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'books'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1);
    }
}
