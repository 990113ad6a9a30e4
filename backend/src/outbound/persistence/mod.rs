//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories only translate between Diesel rows and domain types. Row
//! structs and table definitions stay private to this module. Connections
//! come from a `bb8` pool of `diesel-async` connections.
//!
//! ```ignore
//! use roteiro_backend::outbound::persistence::{DbPool, DieselTouristSpotRepository, PoolSizing};
//!
//! let pool = DbPool::connect("postgres://localhost/roteiro", PoolSizing::default()).await?;
//! let spots = DieselTouristSpotRepository::new(pool);
//! ```

mod diesel_helpers;
mod diesel_tourist_spot_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_tourist_spot_repository::DieselTouristSpotRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, DbPoolError, PoolSizing, PooledPgConnection};
