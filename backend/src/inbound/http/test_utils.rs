//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    ItineraryPlanner, LoginService, MockItineraryPlanner, MockTokenService, TokenService,
};
use crate::domain::{TokenPair, UserId};
use crate::inbound::http::state::HttpState;
use crate::outbound::auth::{JwtTokenService, TokenLifetimes};

/// Signing secret shared by HTTP tests.
pub(crate) const TEST_JWT_SECRET: &[u8] = b"roteiro-http-test-secret";

/// Real token service with the test secret and default lifetimes.
pub(crate) fn jwt_tokens() -> JwtTokenService {
    JwtTokenService::new(TEST_JWT_SECRET, TokenLifetimes::default())
}

/// Issue a token pair for `user_id` with [`jwt_tokens`].
pub(crate) fn issue_pair(user_id: &UserId) -> TokenPair {
    jwt_tokens()
        .issue_pair(user_id)
        .expect("test tokens are signed")
}

/// Bundle arbitrary ports into handler state.
pub(crate) fn http_state(
    login: impl LoginService + 'static,
    tokens: impl TokenService + 'static,
    itinerary: impl ItineraryPlanner + 'static,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(login),
        Arc::new(tokens),
        Arc::new(itinerary),
    ))
}

/// State for extractor tests: no itinerary planner expectations.
pub(crate) fn state_with_tokens(
    login: impl LoginService + 'static,
    tokens: MockTokenService,
) -> web::Data<HttpState> {
    http_state(login, tokens, MockItineraryPlanner::new())
}
