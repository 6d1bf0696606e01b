//! Book repository for database operations.

use crate::entities::{Book, BookStatus, BookUpdate, BookWithOwner, NewBook, OwnerSummary};
use crate::types::{StoreError, StoreResult};
use chrono::Utc;
use sqlx::{Row, SqlitePool};

/// Repository for book database operations
#[derive(Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new book for its owner. Books start out AVAILABLE.
    pub async fn create(&self, book: &NewBook) -> StoreResult<Book> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO books (title, author, description, status, owner_id, created_at, updated_at) \
             VALUES (?, ?, ?, 'AVAILABLE', ?, ?, ?)",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.owner_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Book {
            id: result.last_insert_rowid(),
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            condition: None,
            status: BookStatus::Available,
            owner_id: book.owner_id,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub async fn find_by_id(&self, id: i64) -> StoreResult<Option<Book>> {
        let row = sqlx::query(
            "SELECT id, title, author, description, condition, status, owner_id, created_at, updated_at \
             FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(map_book))
    }

    /// All AVAILABLE books joined with their owner's id and name.
    pub async fn list_available(&self) -> StoreResult<Vec<BookWithOwner>> {
        let rows = sqlx::query(
            "SELECT b.id, b.title, b.author, b.description, b.condition, b.status, \
                    b.owner_id, b.created_at, b.updated_at, u.name AS owner_name \
             FROM books b \
             JOIN users u ON u.id = b.owner_id \
             WHERE b.status = 'AVAILABLE' \
             ORDER BY b.id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let owner = OwnerSummary {
                    id: row.get("owner_id"),
                    name: row.get("owner_name"),
                };
                BookWithOwner {
                    book: map_book(row),
                    owner,
                }
            })
            .collect())
    }

    /// Apply the provided fields to an existing book. Absent fields are
    /// left untouched; a vanished row maps to `NotFound`.
    pub async fn update(&self, id: i64, update: &BookUpdate) -> StoreResult<Book> {
        let mut assignments = Vec::new();
        let mut values = Vec::new();

        if let Some(ref title) = update.title {
            assignments.push("title = ?");
            values.push(title.clone());
        }
        if let Some(ref author) = update.author {
            assignments.push("author = ?");
            values.push(author.clone());
        }
        if let Some(ref condition) = update.condition {
            assignments.push("condition = ?");
            values.push(condition.clone());
        }

        if assignments.is_empty() {
            return self.find_by_id(id).await?.ok_or(StoreError::NotFound);
        }

        assignments.push("updated_at = ?");
        values.push(Utc::now().to_rfc3339());

        let query_str = format!("UPDATE books SET {} WHERE id = ?", assignments.join(", "));

        let mut query = sqlx::query(&query_str);
        for value in values {
            query = query.bind(value);
        }
        let result = query.bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        self.find_by_id(id).await?.ok_or(StoreError::NotFound)
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

fn map_book(row: sqlx::sqlite::SqliteRow) -> Book {
    Book {
        id: row.get("id"),
        title: row.get("title"),
        author: row.get("author"),
        description: row.get("description"),
        condition: row.get("condition"),
        status: BookStatus::from(row.get::<String, _>("status").as_str()),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
