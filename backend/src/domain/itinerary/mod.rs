//! Itinerary planning: request validation, region resolution, prompt
//! composition and the generation use-case.

mod prompt;
mod region;
mod request;
mod service;

pub use prompt::{DEFAULT_INTERESTS, compose_prompt, describe_spot};
pub use region::{Region, WHOLE_REGION_LABEL};
pub use request::{
    CITY_MAX_CHARS, INTERESTS_MAX_CHARS, ItineraryRequestError, LODGING_MAX_CHARS, MAX_TRIP_DAYS,
    MIN_TRIP_DAYS, TripDays, TripRequest,
};
pub use service::{GeneratedItinerary, ItineraryError, ItineraryService};
