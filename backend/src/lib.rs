//! Roteiro Ibiapaba backend.
//!
//! Hexagonal layout: [`domain`] holds the itinerary and authentication
//! logic behind ports, [`inbound`] exposes it over HTTP and [`outbound`]
//! implements the ports against PostgreSQL, Gemini and the JWT/Argon2 crates.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
