//! Middleware for authentication and request logging

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller identity decoded from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

/// Authentication middleware guarding the protected routes.
///
/// A missing token is `401`; a token that is present but invalid or
/// expired is `403`. On success the decoded identity is attached to the
/// request extensions for downstream handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::unauthenticated("No token provided"))?;

    let claims = state
        .authenticator()
        .verify_token(token)
        .map_err(|_| ApiError::forbidden("Invalid token"))?;

    request.extensions_mut().insert(AuthUser {
        id: claims.user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "request completed"
    );

    response
}
