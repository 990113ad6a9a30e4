//! Driven port for password hashing.
//!
//! Hashing is deliberately slow, so adapters are async and expected to move
//! the work off the request executor.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing or verifying passwords.
    pub enum PasswordHashError {
        /// Producing a new hash failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` into a self-describing PHC string.
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check `password` against a stored PHC string.
    async fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError>;
}
