//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::itinerary::{ItineraryErrorBody, ItineraryRequest, ItineraryResponse};
use crate::inbound::http::users::{
    AccessTokenResponse, LoginRequest, RefreshRequest, TokenPairResponse,
};

/// Registers the JWT bearer scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token from POST /api/auth/login/."))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Roteiro Ibiapaba API",
        description = "Itinerary generation for the Serra da Ibiapaba, token authentication and health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::refresh,
        crate::inbound::http::itinerary::generate_itinerary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        TokenPairResponse,
        RefreshRequest,
        AccessTokenResponse,
        ItineraryRequest,
        ItineraryResponse,
        ItineraryErrorBody,
    )),
    tags(
        (name = "auth", description = "Token issuance and refresh"),
        (name = "itinerary", description = "AI-generated travel itineraries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
