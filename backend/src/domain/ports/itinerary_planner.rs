//! Driving port for itinerary generation.

use async_trait::async_trait;

use crate::domain::{GeneratedItinerary, ItineraryError, TripRequest};

/// Use-case port the HTTP adapter calls to plan a trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItineraryPlanner: Send + Sync {
    /// Resolve the region, compose the prompt and generate the itinerary.
    async fn plan(&self, request: &TripRequest) -> Result<GeneratedItinerary, ItineraryError>;
}
