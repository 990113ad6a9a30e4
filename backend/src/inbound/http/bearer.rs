//! Bearer token extractor.
//!
//! Handlers that take [`BearerAuth`] only run for requests carrying a valid
//! access token in `Authorization: Bearer <token>` whose subject is still an
//! active account.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error};

use crate::domain::ports::TokenError;
use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated caller resolved from an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BearerAuth(UserId);

impl BearerAuth {
    /// Identifier of the authenticated user.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

/// Map token failures to HTTP-facing errors.
///
/// Signing failures are server faults; every other failure is the caller's.
pub(crate) fn map_token_error(err: TokenError) -> Error {
    match err {
        TokenError::Signing { message } => {
            error!(%message, "token signing failed");
            Error::internal("token signing failed")
        }
        TokenError::Expired => Error::unauthorized("token has expired"),
        other => {
            debug!(error = %other, "token rejected");
            Error::unauthorized("invalid token")
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("authentication credentials were not provided"))?;
    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))
}

/// Signature and claim checks; cheap, so they run before the future is built.
fn verified_subject(req: &HttpRequest) -> Result<(web::Data<HttpState>, UserId), Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let token = bearer_token(req)?;
    let user_id = state.tokens.verify_access(token).map_err(map_token_error)?;
    Ok((state, user_id))
}

impl FromRequest for BearerAuth {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let verified = verified_subject(req);
        Box::pin(async move {
            let (state, user_id) = verified?;
            state.login.active_user(&user_id).await.map(BearerAuth)
        })
    }
}
