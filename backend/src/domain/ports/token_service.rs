//! Driven port for issuing and validating bearer tokens.

use crate::domain::{TokenPair, UserId};

use super::define_port_error;

define_port_error! {
    /// Token validation and signing failures.
    pub enum TokenError {
        /// Signature, structure or claims are invalid.
        Invalid { message: String } => "token is invalid: {message}",
        /// The token is past its expiry.
        Expired => "token has expired",
        /// A refresh token was presented where an access token is required,
        /// or the other way round.
        WrongKind { expected: String } => "token kind mismatch: expected {expected}",
        /// Signing a new token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Token issuance and verification.
///
/// Signing and verification are cheap, so the port is synchronous and can be
/// called from request extractors.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a fresh access/refresh pair for `user_id`.
    fn issue_pair(&self, user_id: &UserId) -> Result<TokenPair, TokenError>;

    /// Issue a single access token for `user_id`.
    fn issue_access(&self, user_id: &UserId) -> Result<String, TokenError>;

    /// Validate a refresh token and return its subject.
    fn verify_refresh(&self, refresh_token: &str) -> Result<UserId, TokenError>;

    /// Validate an access token and return its subject.
    fn verify_access(&self, access_token: &str) -> Result<UserId, TokenError>;
}
