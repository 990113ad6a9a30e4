//! HTTP inbound adapter exposing REST endpoints.

pub mod bearer;
pub mod error;
pub mod health;
pub mod itinerary;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
mod validation;

pub use error::ApiResult;
