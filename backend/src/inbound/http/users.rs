//! Token authentication handlers.
//!
//! ```text
//! POST /api/auth/login   {"email":"admin@example.com","password":"admin123"}
//! POST /api/auth/refresh {"refresh":"<token>"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::map_token_error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ValidationCode, field_error, missing_field_error,
};

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "admin123")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Tokens issued on a successful login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// Refresh request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh: String,
}

/// Fresh access token minted from a refresh token.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AccessTokenResponse {
    pub access: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => field_error(
            FieldName::new("email"),
            ValidationCode::EmptyEmail,
            err.to_string(),
        ),
        LoginValidationError::EmptyPassword => field_error(
            FieldName::new("password"),
            ValidationCode::EmptyPassword,
            err.to_string(),
        ),
    }
}

/// Exchange email and password for an access/refresh token pair.
#[utoipa::path(
    post,
    path = "/api/auth/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Tokens issued", body = TokenPairResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenPairResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    let pair = state.tokens.issue_pair(&user_id).map_err(map_token_error)?;
    info!(%user_id, "login succeeded");
    Ok(web::Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

/// Mint a new access token from a refresh token.
///
/// The token subject must still be an active account.
#[utoipa::path(
    post,
    path = "/api/auth/refresh/",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Access token issued", body = AccessTokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid or expired refresh token, or inactive user", body = Error),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "refreshToken",
    security([])
)]
#[post("/refresh")]
pub async fn refresh(
    state: web::Data<HttpState>,
    payload: web::Json<RefreshRequest>,
) -> ApiResult<web::Json<AccessTokenResponse>> {
    let token = payload.into_inner().refresh;
    let token = token.trim();
    if token.is_empty() {
        return Err(missing_field_error(FieldName::new("refresh")));
    }
    let subject = state.tokens.verify_refresh(token).map_err(map_token_error)?;
    let user_id = state.login.active_user(&subject).await?;
    let access = state.tokens.issue_access(&user_id).map_err(map_token_error)?;
    Ok(web::Json(AccessTokenResponse { access }))
}
