//! Password login backed by the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::ports::{
    LoginService, PasswordHashError, PasswordHasher, USER_INACTIVE, USER_NOT_FOUND,
    UserPersistenceError, UserRepository,
};
use super::{Email, Error, LoginCredentials, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Authenticates users by email and password hash.
///
/// Unknown emails, wrong passwords and inactive accounts are
/// indistinguishable to the caller.
#[derive(Clone)]
pub struct PasswordLoginService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl PasswordLoginService {
    /// Create a login service over the given ports.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }
}

pub(crate) fn map_user_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::service_unavailable("user store is unavailable")
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal("user store query failed")
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::invalid_request(format!("a user with email {email} already exists"))
        }
    }
}

pub(crate) fn map_password_hash_error(err: PasswordHashError) -> Error {
    error!(error = %err, "password hashing failed");
    Error::internal("password verification failed")
}

#[async_trait]
impl LoginService for PasswordLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let Ok(email) = Email::new(credentials.email()) else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let Some(account) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_persistence_error)?
        else {
            debug!("login attempt for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        let verified = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(map_password_hash_error)?;
        if !verified || !account.user.is_active {
            debug!(user_id = %account.user.id, "login rejected");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.user.id)
    }

    async fn active_user(&self, user_id: &UserId) -> Result<UserId, Error> {
        match self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
        {
            Some(user) if user.is_active => Ok(user.id),
            Some(_) => {
                debug!(%user_id, "token presented for inactive user");
                Err(Error::unauthorized(USER_INACTIVE))
            }
            None => {
                debug!(%user_id, "token presented for unknown user");
                Err(Error::unauthorized(USER_NOT_FOUND))
            }
        }
    }
}
