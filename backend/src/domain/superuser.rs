//! Idempotent provisioning of the administrative account.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::authentication::{map_password_hash_error, map_user_persistence_error};
use super::ports::{PasswordHasher, UserRepository};
use super::{Email, Error, User, UserAccount, UserId, UserName};

/// Result of a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuperuserOutcome {
    /// A new account was stored.
    Created(User),
    /// An account with the same email already existed and was left untouched.
    AlreadyExists(Email),
}

/// Creates the staff account if no user holds its email yet.
#[derive(Clone)]
pub struct SuperuserProvisioner {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl SuperuserProvisioner {
    /// Create a provisioner over the given ports.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Ensure a staff account exists for `email`.
    pub async fn ensure(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SuperuserOutcome, Error> {
        let name = UserName::new(name).map_err(|err| Error::invalid_request(err.to_string()))?;
        let email = Email::new(email).map_err(|err| Error::invalid_request(err.to_string()))?;
        if password.is_empty() {
            return Err(Error::invalid_request("password must not be empty"));
        }

        if self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_persistence_error)?
            .is_some()
        {
            info!(%email, "superuser already exists");
            return Ok(SuperuserOutcome::AlreadyExists(email));
        }

        let password_hash = self
            .hasher
            .hash(password)
            .await
            .map_err(map_password_hash_error)?;
        let user = User {
            id: UserId::random(),
            name,
            email,
            photo: None,
            is_active: true,
            is_staff: true,
            created_at: Utc::now(),
        };
        self.users
            .insert(&UserAccount {
                user: user.clone(),
                password_hash,
            })
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id, email = %user.email, "superuser created");
        Ok(SuperuserOutcome::Created(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};

    #[tokio::test]
    async fn creates_staff_account_with_hashed_password() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().times(1).returning(|_| Ok(None));
        users
            .expect_insert()
            .withf(|account| {
                account.password_hash == "hashed"
                    && account.user.is_staff
                    && account.user.is_active
                    && account.user.email.as_ref() == "admin@example.com"
            })
            .times(1)
            .returning(|_| Ok(()));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|password| password == "admin123")
            .times(1)
            .returning(|_| Ok("hashed".to_owned()));

        let outcome = SuperuserProvisioner::new(Arc::new(users), Arc::new(hasher))
            .ensure("admin", "admin@example.com", "admin123")
            .await
            .expect("provisioning succeeds");
        assert!(matches!(outcome, SuperuserOutcome::Created(user) if user.is_staff));
    }

    #[tokio::test]
    async fn existing_email_is_left_untouched() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|email| {
            Ok(Some(UserAccount {
                user: User {
                    id: UserId::random(),
                    name: UserName::new("admin").expect("valid name"),
                    email: email.clone(),
                    photo: None,
                    is_active: true,
                    is_staff: true,
                    created_at: Utc::now(),
                },
                password_hash: "old".to_owned(),
            }))
        });
        users.expect_insert().never();
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let outcome = SuperuserProvisioner::new(Arc::new(users), Arc::new(hasher))
            .ensure("admin", "admin@example.com", "admin123")
            .await
            .expect("provisioning succeeds");
        assert!(matches!(outcome, SuperuserOutcome::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let err = SuperuserProvisioner::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockPasswordHasher::new()),
        )
        .ensure("admin", "nope", "admin123")
        .await
        .expect_err("invalid email");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
