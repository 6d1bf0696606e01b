//! User repository for database operations.

use crate::entities::{NewUser, User};
use crate::types::StoreResult;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user row. A duplicate email surfaces as
    /// [`StoreError::EmailAlreadyExists`](crate::types::StoreError).
    pub async fn create(&self, user: &NewUser) -> StoreResult<User> {
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, name, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            name: user.name.clone(),
            created_at,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, name, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(map_user))
    }

    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, name, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(map_user))
    }
}

fn map_user(row: sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}
