//! HS256 JSON Web Token adapter for the `TokenService` port.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{TokenKind, TokenPair, UserId};

/// How long issued tokens stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::hours(24),
            refresh: Duration::days(7),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: String,
    token_type: TokenKind,
    exp: i64,
    iat: i64,
    jti: String,
}

/// Signs and verifies tokens with a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetimes: TokenLifetimes,
}

impl JwtTokenService {
    /// Create a service signing with `secret`.
    pub fn new(secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            lifetimes,
        }
    }

    fn sign(&self, user_id: &UserId, kind: TokenKind) -> Result<String, TokenError> {
        let lifetime = match kind {
            TokenKind::Access => self.lifetimes.access,
            TokenKind::Refresh => self.lifetimes.refresh,
        };
        let issued_at = Utc::now();
        let claims = Claims {
            user_id: user_id.to_string(),
            token_type: kind,
            exp: (issued_at + lifetime).timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().simple().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<UserId, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            })?
            .claims;
        if claims.token_type != expected {
            return Err(TokenError::wrong_kind(expected.as_str()));
        }
        UserId::new(&claims.user_id).map_err(|err| TokenError::invalid(err.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue_pair(&self, user_id: &UserId) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access: self.sign(user_id, TokenKind::Access)?,
            refresh: self.sign(user_id, TokenKind::Refresh)?,
        })
    }

    fn issue_access(&self, user_id: &UserId) -> Result<String, TokenError> {
        self.sign(user_id, TokenKind::Access)
    }

    fn verify_refresh(&self, refresh_token: &str) -> Result<UserId, TokenError> {
        self.verify(refresh_token, TokenKind::Refresh)
    }

    fn verify_access(&self, access_token: &str) -> Result<UserId, TokenError> {
        self.verify(access_token, TokenKind::Access)
    }
}
