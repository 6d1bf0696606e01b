//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use bookswap_database::{Book, BookStatus, BookUpdate, BookWithOwner, NewBook};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::rest::auth::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub condition: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub condition: Option<String>,
    pub status: BookStatus,
    pub owner_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            description: book.description,
            condition: book.condition,
            status: book.status,
            owner_id: book.owner_id,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookWithOwnerResponse {
    #[serde(flatten)]
    pub book: BookResponse,
    pub owner: OwnerResponse,
}

#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    pub id: i64,
    pub name: Option<String>,
}

impl From<BookWithOwner> for BookWithOwnerResponse {
    fn from(row: BookWithOwner) -> Self {
        Self {
            book: BookResponse::from(row.book),
            owner: OwnerResponse {
                id: row.owner.id,
                name: row.owner.name,
            },
        }
    }
}

pub async fn add_book(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateBookRequest>,
) -> ApiResult<impl IntoResponse> {
    // The owner always comes from the verified token, never the body.
    let book = state
        .books()
        .create(&NewBook {
            title: payload.title,
            author: payload.author,
            description: payload.description,
            owner_id: user.id,
        })
        .await
        .map_err(|err| ApiError::internal("Failed to create book.", err))?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

pub async fn get_books(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<BookWithOwnerResponse>>> {
    let books = state
        .books()
        .list_available()
        .await
        .map_err(|err| ApiError::internal("Failed to fetch books.", err))?;

    Ok(Json(books.into_iter().map(Into::into).collect()))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateBookRequest>,
) -> ApiResult<Json<BookResponse>> {
    let book = state
        .books()
        .find_by_id(book_id)
        .await
        .map_err(|err| ApiError::internal("Failed to update book.", err))?
        .ok_or_else(|| ApiError::not_found("Book not found"))?;

    if book.owner_id != user.id {
        return Err(ApiError::forbidden("Not authorized to update this book"));
    }

    let updated = state
        .books()
        .update(
            book_id,
            &BookUpdate {
                title: payload.title,
                author: payload.author,
                condition: payload.condition,
            },
        )
        .await
        .map_err(|err| ApiError::internal("Failed to update book.", err))?;

    Ok(Json(BookResponse::from(updated)))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<MessageResponse>> {
    let book = state
        .books()
        .find_by_id(book_id)
        .await
        .map_err(|err| ApiError::internal("Failed to delete book.", err))?
        .ok_or_else(|| ApiError::not_found("Book not found"))?;

    if book.owner_id != user.id {
        return Err(ApiError::forbidden("Not authorized to delete this book"));
    }

    state
        .books()
        .delete(book_id)
        .await
        .map_err(|err| ApiError::internal("Failed to delete book.", err))?;

    Ok(Json(MessageResponse {
        message: "Book deleted successfully".to_string(),
    }))
}
