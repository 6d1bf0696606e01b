//! Registration, login, and profile endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use bookswap_auth::AuthError;
use bookswap_database::User;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// The user object handed back by the profile endpoint. The password
/// hash is deliberately absent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from the BookSwap backend!".to_string(),
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (
        payload.email.filter(|v| !v.is_empty()),
        payload.password.filter(|v| !v.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Email and password are required."));
    };

    let user = state
        .authenticator()
        .register(&email, &password, payload.name.as_deref())
        .await
        .map_err(|err| match err {
            AuthError::EmailTaken => ApiError::conflict("Email already exists."),
            err => ApiError::internal("An error occurred during registration.", err),
        })?;

    let response = RegisterResponse {
        message: "User created successfully".to_string(),
        user_id: user.id,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let token = state
        .authenticator()
        .login(&email, &password)
        .await
        .map_err(|err| match err {
            AuthError::InvalidCredentials => ApiError::unauthenticated("Invalid credentials."),
            err => ApiError::internal("An error occurred during login.", err),
        })?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<ProfileResponse>> {
    let user = state
        .authenticator()
        .user_profile(user.id)
        .await
        .map_err(|err| ApiError::internal("Failed to fetch profile.", err))?;

    Ok(Json(ProfileResponse::from(user)))
}
