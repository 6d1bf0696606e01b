//! JWT issuance and validation.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::AuthError;

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

/// Signs and validates the HS256 bearer tokens handed to clients.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            token_ttl: Duration::from_secs(3600),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Sign a token carrying the user's identity.
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::TokenCreation)?;
        let exp = now + self.token_ttl;

        let claims = Claims {
            user_id,
            email: email.to_string(),
            exp: exp.as_secs() as usize,
            iat: now.as_secs() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenCreation)
    }

    /// Validate a token and return its claims. Expired tokens are rejected
    /// with no leeway.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret-long-enough-for-hs256")
    }

    fn unix_now() -> usize {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize
    }

    #[test]
    fn issued_tokens_carry_the_identity() {
        let token = issuer().issue(7, "a@x.com").unwrap();
        let claims = issuer().verify(&token).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let result = issuer().verify("not.a.token");
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = TokenIssuer::new("other-secret").issue(7, "a@x.com").unwrap();
        let result = issuer().verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let now = unix_now();
        let claims = Claims {
            user_id: 7,
            email: "a@x.com".to_string(),
            exp: now - 120,
            iat: now - 3720,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret-long-enough-for-hs256".as_ref()),
        )
        .unwrap();

        let result = issuer().verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn claim_names_are_camel_case_on_the_wire() {
        let claims = Claims {
            user_id: 7,
            email: "a@x.com".to_string(),
            exp: 10,
            iat: 0,
        };
        let json = serde_json::to_string(&claims).unwrap();

        assert!(json.contains("\"userId\":7"));
        assert!(!json.contains("user_id"));
    }
}
