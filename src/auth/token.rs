//! Bearer token issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::model::{Role, User};

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid or expired token")]
pub struct TokenError(#[source] jsonwebtoken::errors::Error);

/// HS256 signer/verifier with a fixed token lifetime.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Sign a token for `user`, expiring one lifetime from now.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError)
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(TokenError)
    }
}
