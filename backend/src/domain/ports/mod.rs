//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod itinerary_planner;
mod login_service;
mod password_hasher;
mod text_generation_source;
mod token_service;
mod tourist_spot_repository;
mod user_repository;

#[cfg(test)]
pub use itinerary_planner::MockItineraryPlanner;
pub use itinerary_planner::ItineraryPlanner;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    FIXTURE_LOGIN_EMAIL, FIXTURE_LOGIN_PASSWORD, FIXTURE_LOGIN_USER_ID, FixtureLoginService,
    LoginService, USER_INACTIVE, USER_NOT_FOUND,
};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use text_generation_source::MockTextGenerationSource;
pub use text_generation_source::{TextGenerationError, TextGenerationSource};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use tourist_spot_repository::MockTouristSpotRepository;
pub use tourist_spot_repository::{
    FixtureTouristSpotRepository, TouristSpotRepository, TouristSpotRepositoryError,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
