//! Driving port for login use-cases.
//!
//! Inbound adapters call it to turn credentials into a user id without
//! importing persistence or hashing infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown emails, wrong passwords and inactive accounts all fail with
    /// the same unauthorised error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;

    /// Confirm that a token subject still names an active account.
    ///
    /// Deleted and deactivated accounts fail with an unauthorised error, so
    /// tokens issued before the change stop working.
    async fn active_user(&self, user_id: &UserId) -> Result<UserId, Error>;
}

/// Message returned when a token subject no longer exists.
pub const USER_NOT_FOUND: &str = "user not found";
/// Message returned when a token subject has been deactivated.
pub const USER_INACTIVE: &str = "user is inactive";

/// Email of the development account accepted by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_EMAIL: &str = "admin@example.com";
/// Password of the development account accepted by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_PASSWORD: &str = "admin123";
/// User id returned by [`FixtureLoginService`].
pub const FIXTURE_LOGIN_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// In-memory authenticator used when no database is configured.
///
/// Accepts only the default superuser credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.email().eq_ignore_ascii_case(FIXTURE_LOGIN_EMAIL)
            && credentials.password() == FIXTURE_LOGIN_PASSWORD
        {
            UserId::new(FIXTURE_LOGIN_USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }

    async fn active_user(&self, user_id: &UserId) -> Result<UserId, Error> {
        if user_id.to_string() == FIXTURE_LOGIN_USER_ID {
            Ok(*user_id)
        } else {
            Err(Error::unauthorized(USER_NOT_FOUND))
        }
    }
}
