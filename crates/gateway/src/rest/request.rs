//! Swap request endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use bookswap_database::{IncomingRequest, NewRequest, SwapRequest};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestRequest {
    pub book_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub id: i64,
    pub book_id: i64,
    pub requester_id: i64,
    pub created_at: String,
}

impl From<SwapRequest> for RequestResponse {
    fn from(request: SwapRequest) -> Self {
        Self {
            id: request.id,
            book_id: request.book_id,
            requester_id: request.requester_id,
            created_at: request.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IncomingRequestResponse {
    #[serde(flatten)]
    pub request: RequestResponse,
    pub requester: RequesterResponse,
    pub book: BookSummaryResponse,
}

#[derive(Debug, Serialize)]
pub struct RequesterResponse {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookSummaryResponse {
    pub title: String,
}

impl From<IncomingRequest> for IncomingRequestResponse {
    fn from(row: IncomingRequest) -> Self {
        Self {
            request: RequestResponse::from(row.request),
            requester: RequesterResponse {
                name: row.requester_name,
            },
            book: BookSummaryResponse {
                title: row.book_title,
            },
        }
    }
}

pub async fn create_request(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateRequestRequest>,
) -> ApiResult<impl IntoResponse> {
    // A request against a nonexistent book degenerates to a 500, matching
    // the published failure surface of this endpoint.
    let book = state
        .books()
        .find_by_id(payload.book_id)
        .await
        .map_err(|err| ApiError::internal("Failed to create request.", err))?
        .ok_or_else(|| ApiError::Internal("Failed to create request.".to_string()))?;

    if book.owner_id == user.id {
        return Err(ApiError::bad_request("You cannot request your own book."));
    }

    let request = state
        .requests()
        .create(&NewRequest {
            book_id: book.id,
            requester_id: user.id,
        })
        .await
        .map_err(|err| ApiError::internal("Failed to create request.", err))?;

    Ok((StatusCode::CREATED, Json(RequestResponse::from(request))))
}

pub async fn incoming_requests(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<IncomingRequestResponse>>> {
    let requests = state
        .requests()
        .list_incoming(user.id)
        .await
        .map_err(|err| ApiError::internal("Failed to fetch incoming requests.", err))?;

    Ok(Json(requests.into_iter().map(Into::into).collect()))
}
