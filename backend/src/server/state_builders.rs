//! Builders wiring ports to adapters for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use roteiro_backend::domain::ports::{
    FixtureLoginService, FixtureTouristSpotRepository, LoginService, TouristSpotRepository,
};
use roteiro_backend::domain::{ItineraryService, PasswordLoginService};
use roteiro_backend::inbound::http::state::HttpState;
use roteiro_backend::outbound::auth::{Argon2PasswordHasher, JwtTokenService};
use roteiro_backend::outbound::gemini::GeminiHttpSource;
use roteiro_backend::outbound::persistence::{
    DbPool, DieselTouristSpotRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Spot and login ports, backed by PostgreSQL when a pool is configured.
///
/// Without a pool the fixture ports are used, which accept the well-known
/// development password; `fixtures_allowed` is false in release builds so
/// that mode never reaches production.
fn build_data_ports(
    pool: Option<&DbPool>,
    fixtures_allowed: bool,
) -> std::io::Result<(Arc<dyn TouristSpotRepository>, Arc<dyn LoginService>)> {
    match pool {
        Some(pool) => {
            let spots = Arc::new(DieselTouristSpotRepository::new(pool.clone()));
            let password_login = Arc::new(PasswordLoginService::new(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(Argon2PasswordHasher),
            ));
            Ok((spots, password_login))
        }
        None if fixtures_allowed => {
            warn!("no database configured; serving fixture spots and the development login");
            Ok((
                Arc::new(FixtureTouristSpotRepository),
                Arc::new(FixtureLoginService),
            ))
        }
        None => Err(std::io::Error::other(
            "ROTEIRO_DATABASE_URL must be set; fixture data is only served by debug builds",
        )),
    }
}

/// Build the shared HTTP state from server configuration.
///
/// # Errors
/// Returns an error when the Gemini HTTP client cannot be constructed, or
/// when a release build has no database.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let (spots, login) = build_data_ports(config.db_pool.as_ref(), cfg!(debug_assertions))?;
    let generator = GeminiHttpSource::new(config.gemini.clone())
        .map_err(|err| std::io::Error::other(format!("failed to build Gemini client: {err}")))?;
    let itinerary = ItineraryService::new(spots, Arc::new(generator));
    let tokens = JwtTokenService::new(&config.jwt_secret, config.token_lifetimes);
    Ok(web::Data::new(HttpState::new(
        login,
        Arc::new(tokens),
        Arc::new(itinerary),
    )))
}
