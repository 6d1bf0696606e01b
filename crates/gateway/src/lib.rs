//! # BookSwap Gateway Crate
//!
//! The HTTP layer of the BookSwap backend: route handlers, the bearer
//! token middleware, the shared application state, and the error
//! taxonomy mapping failures to status codes.

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use middleware::{auth_middleware, AuthUser};
pub use state::AppState;

use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes.
///
/// Routes behind the bearer-token middleware reject callers without a
/// valid token; the rest are public.
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/hello", get(rest::auth::hello))
        .route("/api/register", post(rest::auth::register))
        .route("/api/login", post(rest::auth::login))
        .route("/api/get-books", get(rest::book::get_books));

    let protected = Router::new()
        .route("/api/profile", get(rest::auth::profile))
        .route("/api/add-books", post(rest::book::add_book))
        .route("/api/update/:id", post(rest::book::update_book))
        .route("/api/delete-book/:id", delete(rest::book::delete_book))
        .route("/api/requests", post(rest::request::create_request))
        .route("/api/requests/incoming", get(rest::request::incoming_requests))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .with_state(state)
}
