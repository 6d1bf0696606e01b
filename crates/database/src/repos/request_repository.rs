//! Swap request repository for database operations.

use crate::entities::{IncomingRequest, NewRequest, SwapRequest};
use crate::types::StoreResult;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

/// Repository for swap request database operations
#[derive(Clone)]
pub struct RequestRepository {
    pool: SqlitePool,
}

impl RequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: &NewRequest) -> StoreResult<SwapRequest> {
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO requests (book_id, requester_id, created_at) VALUES (?, ?, ?)",
        )
        .bind(request.book_id)
        .bind(request.requester_id)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        Ok(SwapRequest {
            id: result.last_insert_rowid(),
            book_id: request.book_id,
            requester_id: request.requester_id,
            created_at,
        })
    }

    /// All requests targeting books owned by `owner_id`, joined with the
    /// requester's name and the book's title.
    pub async fn list_incoming(&self, owner_id: i64) -> StoreResult<Vec<IncomingRequest>> {
        let rows = sqlx::query(
            "SELECT r.id, r.book_id, r.requester_id, r.created_at, \
                    u.name AS requester_name, b.title AS book_title \
             FROM requests r \
             JOIN books b ON b.id = r.book_id \
             JOIN users u ON u.id = r.requester_id \
             WHERE b.owner_id = ? \
             ORDER BY r.id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| IncomingRequest {
                request: SwapRequest {
                    id: row.get("id"),
                    book_id: row.get("book_id"),
                    requester_id: row.get("requester_id"),
                    created_at: row.get("created_at"),
                },
                requester_name: row.get("requester_name"),
                book_title: row.get("book_title"),
            })
            .collect())
    }

    #[cfg(test)]
    async fn count(&self) -> StoreResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM requests")
            .fetch_one(&self.pool)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{NewBook, NewUser};
    use crate::migrations::run_migrations;
    use crate::repos::{BookRepository, UserRepository};
    use crate::types::StoreError;

    async fn create_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    async fn seed_user(pool: &SqlitePool, email: &str, name: &str) -> i64 {
        UserRepository::new(pool.clone())
            .create(&NewUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
                name: Some(name.to_string()),
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_book(pool: &SqlitePool, owner_id: i64, title: &str) -> i64 {
        BookRepository::new(pool.clone())
            .create(&NewBook {
                title: title.to_string(),
                author: "Author".to_string(),
                description: None,
                owner_id,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn incoming_requests_are_joined_with_names_and_titles() {
        let pool = create_test_pool().await;
        let owner = seed_user(&pool, "owner@example.com", "Owner").await;
        let requester = seed_user(&pool, "req@example.com", "Requester").await;
        let book_id = seed_book(&pool, owner, "Dune").await;
        let repo = RequestRepository::new(pool);

        let created = repo
            .create(&NewRequest {
                book_id,
                requester_id: requester,
            })
            .await
            .unwrap();

        let incoming = repo.list_incoming(owner).await.unwrap();
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].request, created);
        assert_eq!(incoming[0].requester_name.as_deref(), Some("Requester"));
        assert_eq!(incoming[0].book_title, "Dune");

        // The requester sees nothing incoming.
        assert!(repo.list_incoming(requester).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn requests_for_unknown_books_are_rejected_by_the_schema() {
        let pool = create_test_pool().await;
        let requester = seed_user(&pool, "req@example.com", "Requester").await;
        let repo = RequestRepository::new(pool);

        let err = repo
            .create(&NewRequest {
                book_id: 404,
                requester_id: requester,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Database(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
