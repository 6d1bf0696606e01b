//! Authentication for the BookSwap backend: password-based registration
//! and login, plus issuance and validation of the bearer tokens that
//! protect the API.

use bookswap_config::AuthConfig;
use bookswap_database::{NewUser, StoreError, User, UserRepository};
use sqlx::SqlitePool;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already exists")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("user not found")]
    UserNotFound,
    #[error("password hashing failed")]
    PasswordHash,
    #[error("token signing failed")]
    TokenCreation,
    #[error("database error: {0}")]
    Store(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailAlreadyExists => AuthError::EmailTaken,
            StoreError::NotFound => AuthError::UserNotFound,
            StoreError::Database(message) => AuthError::Store(message),
        }
    }
}

#[derive(Clone)]
pub struct Authenticator {
    users: UserRepository,
    tokens: TokenIssuer,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, config: &AuthConfig) -> Self {
        let tokens = TokenIssuer::new(&config.jwt_secret)
            .with_ttl(Duration::from_secs(config.token_ttl_seconds));

        Self {
            users: UserRepository::new(pool),
            tokens,
        }
    }

    /// Hash the password and create the user row. A duplicate email
    /// surfaces as [`AuthError::EmailTaken`].
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&NewUser {
                email: email.to_owned(),
                password_hash,
                name: name.map(str::to_owned),
            })
            .await?;

        info!(user_id = user.id, "registered user");
        Ok(user)
    }

    /// Check the credentials and issue a signed bearer token. An unknown
    /// email and a wrong password return the same error, so callers learn
    /// nothing about which emails are registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.tokens.issue(user.id, &user.email)
    }

    /// Validate a bearer token and return its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }

    pub async fn user_profile(&self, user_id: i64) -> Result<User, AuthError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookswap_database::run_migrations;

    async fn authenticator() -> Authenticator {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        let config = AuthConfig {
            jwt_secret: "test-secret-long-enough-for-hs256".to_string(),
            token_ttl_seconds: 3600,
        };
        Authenticator::new(pool, &config)
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let auth = authenticator().await;

        let user = auth
            .register("a@x.com", "pw", Some("A"))
            .await
            .unwrap();

        let token = auth.login("a@x.com", "pw").await.unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.email, "a@x.com");
    }

    #[tokio::test]
    async fn duplicate_registration_is_a_conflict() {
        let auth = authenticator().await;

        auth.register("a@x.com", "pw", Some("A")).await.unwrap();
        let err = auth.register("a@x.com", "other", None).await.unwrap_err();

        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let auth = authenticator().await;
        auth.register("a@x.com", "pw", Some("A")).await.unwrap();

        let unknown = auth.login("nobody@x.com", "pw").await.unwrap_err();
        let mismatch = auth.login("a@x.com", "wrong").await.unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(mismatch, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), mismatch.to_string());
    }

    #[tokio::test]
    async fn profile_lookup_returns_the_registered_user() {
        let auth = authenticator().await;
        let user = auth.register("a@x.com", "pw", Some("A")).await.unwrap();

        let profile = auth.user_profile(user.id).await.unwrap();
        assert_eq!(profile.email, "a@x.com");
        assert_eq!(profile.name.as_deref(), Some("A"));

        let err = auth.user_profile(999).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }
}
