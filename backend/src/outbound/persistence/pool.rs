//! Connection pool shared by the Diesel repositories.
//!
//! One pool serves both repositories. Sizing comes from
//! [`AppSettings::pool_sizing`](crate::settings::AppSettings::pool_sizing);
//! `create-superuser` uses [`PoolSizing::single`].

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Connection checked out of a [`DbPool`].
pub type PooledPgConnection<'a> = PooledConnection<'a, AsyncPgConnection>;

/// Pool limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSizing {
    /// Upper bound on open connections; never zero.
    pub max_connections: u32,
    /// How long a repository call waits for a free connection.
    pub checkout_timeout: Duration,
}

impl PoolSizing {
    /// One connection, for short-lived command line tools.
    pub const fn single() -> Self {
        Self {
            max_connections: 1,
            checkout_timeout: Duration::from_secs(10),
        }
    }
}

impl Default for PoolSizing {
    fn default() -> Self {
        Self {
            max_connections: 10,
            checkout_timeout: Duration::from_secs(30),
        }
    }
}

/// Pool failures, split by whether the database was ever reachable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DbPoolError {
    /// The first connection could not be opened.
    #[error("could not open database pool: {0}")]
    Connect(String),
    /// Every connection stayed busy or broken past the checkout timeout.
    #[error("no database connection available: {0}")]
    Exhausted(String),
}

impl DbPoolError {
    /// Underlying driver message.
    pub fn message(&self) -> &str {
        match self {
            Self::Connect(message) | Self::Exhausted(message) => message,
        }
    }
}

/// Cloneable handle to the PostgreSQL pool.
#[derive(Clone)]
pub struct DbPool(Pool<AsyncPgConnection>);

impl DbPool {
    /// Open the pool, keeping one idle connection so a bad URL or an
    /// unreachable server fails here rather than on the first request.
    ///
    /// # Errors
    /// [`DbPoolError::Connect`] when the first connection cannot be opened.
    pub async fn connect(database_url: &str, sizing: PoolSizing) -> Result<Self, DbPoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        Pool::builder()
            .max_size(sizing.max_connections.max(1))
            .min_idle(Some(1))
            .connection_timeout(sizing.checkout_timeout)
            .build(manager)
            .await
            .map(Self)
            .map_err(|err| DbPoolError::Connect(err.to_string()))
    }

    /// Check out a connection.
    ///
    /// # Errors
    /// [`DbPoolError::Exhausted`] when none frees up within the timeout.
    pub async fn connection(&self) -> Result<PooledPgConnection<'_>, DbPoolError> {
        self.0
            .get()
            .await
            .map_err(|err| DbPoolError::Exhausted(err.to_string()))
    }
}
