//! Domain primitives, use-cases and ports.
//!
//! Types here know nothing about HTTP, SQL or the model vendor. Inbound
//! adapters call the driving ports; outbound adapters implement the driven
//! ones.

pub mod auth;
pub mod authentication;
pub mod error;
pub mod itinerary;
pub mod ports;
pub mod superuser;
pub mod tourist_spot;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, TokenKind, TokenPair};
pub use self::authentication::PasswordLoginService;
pub use self::error::{Error, ErrorCode};
pub use self::itinerary::{
    CITY_MAX_CHARS, DEFAULT_INTERESTS, GeneratedItinerary, INTERESTS_MAX_CHARS, ItineraryError,
    ItineraryRequestError, ItineraryService, LODGING_MAX_CHARS, MAX_TRIP_DAYS, MIN_TRIP_DAYS,
    Region, TripDays, TripRequest, WHOLE_REGION_LABEL, compose_prompt, describe_spot,
};
pub use self::superuser::{SuperuserOutcome, SuperuserProvisioner};
pub use self::tourist_spot::{
    Category, Coordinate, CoordinateError, GeoPoint, TouristSpot, TouristSpotId, UnknownCategory,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, USER_FIELD_MAX, User, UserAccount, UserId, UserName, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use roteiro_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("missing token"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
