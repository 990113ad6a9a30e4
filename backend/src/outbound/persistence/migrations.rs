//! Embedded schema migrations.
//!
//! Diesel's migration harness needs a synchronous connection, so the run is
//! moved onto Tokio's blocking pool.

use diesel::{Connection, ConnectionError, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be opened.
    #[error("database connection for migrations failed: {0}")]
    Connect(#[from] ConnectionError),
    /// A migration failed to apply.
    #[error("database migration failed: {message}")]
    Apply { message: String },
    /// The blocking task did not complete.
    #[error("migration task aborted: {message}")]
    Task { message: String },
}

/// Apply every pending migration and return the versions applied.
///
/// # Errors
///
/// Returns [`MigrationError`] when connecting or applying fails.
pub async fn run_pending_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || -> Result<Vec<String>, MigrationError> {
        let mut conn = PgConnection::establish(&database_url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Apply {
                message: err.to_string(),
            })?
            .into_iter()
            .map(|version| version.to_string())
            .collect::<Vec<_>>();
        info!(count = applied.len(), "database migrations applied");
        Ok(applied)
    })
    .await
    .map_err(|err| MigrationError::Task {
        message: err.to_string(),
    })?
}
