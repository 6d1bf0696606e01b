//! Shared application state for the gateway

use bookswap_auth::Authenticator;
use bookswap_database::{BookRepository, RequestRepository};
use sqlx::SqlitePool;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    authenticator: Authenticator,
    books: BookRepository,
    requests: RequestRepository,
}

impl AppState {
    pub fn new(pool: SqlitePool, authenticator: Authenticator) -> Self {
        Self {
            authenticator,
            books: BookRepository::new(pool.clone()),
            requests: RequestRepository::new(pool),
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn books(&self) -> &BookRepository {
        &self.books
    }

    pub fn requests(&self) -> &RequestRepository {
        &self.requests
    }
}
