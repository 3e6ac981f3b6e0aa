//! Bearer token verification
//!
//! Accounts and login live in another subsystem; this side only checks the
//! HS256 signature and expiry, then reads the user id from `sub`. Minting is
//! here for tests and operator tooling.

use chrono::{Duration, Utc};
use gallery_core::Snowflake;
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Decimal user id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Claims {
    fn issue(user_id: Snowflake, username: Option<&str>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            username: username.map(str::to_owned),
        }
    }

    /// The account the token was issued to
    ///
    /// # Errors
    /// `InvalidToken` when `sub` is not a positive integer
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }
}

/// HS256 signer and verifier sharing one secret
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtService {
    /// `token_expiry` is the lifetime of minted tokens in seconds
    #[must_use]
    pub fn new(secret: &str, token_expiry: i64) -> Self {
        let secret = secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl: Duration::seconds(token_expiry),
        }
    }

    /// # Errors
    /// Returns `Internal` if signing fails
    pub fn encode_token(&self, user_id: Snowflake, username: Option<&str>) -> Result<String, AppError> {
        let claims = Claims::issue(user_id, username, self.ttl);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AppError::internal)
    }

    /// # Errors
    /// `TokenExpired` past `exp` (with the library's 60s leeway), otherwise
    /// `InvalidToken` for anything that does not verify
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }

    /// Verify a bearer token and return its user id
    ///
    /// # Errors
    /// Any error from [`Self::decode_token`] or [`Claims::user_id`]
    pub fn validate(&self, token: &str) -> Result<Snowflake, AppError> {
        self.decode_token(token)?.user_id()
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish_non_exhaustive()
    }
}
