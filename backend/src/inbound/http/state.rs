//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever talk to domain
//! ports, so they can be exercised with doubles.

use std::sync::Arc;

use crate::domain::ports::{ItineraryPlanner, LoginService, TokenService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenService>,
    pub itinerary: Arc<dyn ItineraryPlanner>,
}

impl HttpState {
    /// Bundle the ports used by the HTTP layer.
    pub fn new(
        login: Arc<dyn LoginService>,
        tokens: Arc<dyn TokenService>,
        itinerary: Arc<dyn ItineraryPlanner>,
    ) -> Self {
        Self {
            login,
            tokens,
            itinerary,
        }
    }
}
