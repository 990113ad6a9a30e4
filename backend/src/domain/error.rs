//! Errors reported to API clients.
//!
//! [`Error`] knows nothing about HTTP; `inbound::http::error` picks the status
//! code. The itinerary endpoint answers with its own `{error}` envelope and
//! does not go through this type.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Failure category shared by every envelope built from [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Body or field validation failed.
    InvalidRequest,
    /// Credentials or bearer token missing, expired or rejected.
    Unauthorized,
    /// The user store cannot be reached.
    ServiceUnavailable,
    /// Anything else. The message is never shown to clients.
    InternalError,
}

impl ErrorCode {
    /// Whether messages with this code may be returned verbatim.
    pub const fn is_client_facing(self) -> bool {
        !matches!(self, Self::InternalError)
    }
}

/// Error envelope: `{code, message, traceId?, details?}`.
///
/// The trace identifier in scope when the value is built is captured, so a
/// client-visible error can be matched with the request's log lines.
///
/// # Examples
/// ```
/// use roteiro_backend::domain::{Error, ErrorCode};
///
/// let err = Error::unauthorized("invalid token");
/// assert_eq!(err.code(), ErrorCode::Unauthorized);
/// assert_eq!(err.to_string(), "invalid token");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct Error {
    #[schema(example = "unauthorized")]
    code: ErrorCode,
    #[schema(example = "invalid token")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "trace_id")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context, e.g. `{"field": "email", "code": "empty_email"}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

macro_rules! error_constructors {
    ($($(#[$meta:meta])* $name:ident => $code:ident),+ $(,)?) => {
        impl Error {
            $(
                $(#[$meta])*
                pub fn $name(message: impl Into<String>) -> Self {
                    Self::new(ErrorCode::$code, message)
                }
            )+
        }
    };
}

error_constructors! {
    /// Rejected input; maps to `400`.
    invalid_request => InvalidRequest,
    /// Rejected credentials or token; maps to `401`.
    unauthorized => Unauthorized,
    /// Backing store down; maps to `503`.
    service_unavailable => ServiceUnavailable,
    /// Server fault; maps to `500` with a redacted message.
    internal => InternalError,
}

impl Error {
    /// Build an error tagged with the trace identifier in scope, if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the captured trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach field-level context.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Copy safe to return to clients.
    ///
    /// Internal errors lose their message and details but keep the trace
    /// identifier so support can still find the log entry.
    #[must_use]
    pub fn public_view(&self) -> Self {
        if self.code.is_client_facing() {
            return self.clone();
        }
        Self {
            code: self.code,
            message: "Internal server error".to_owned(),
            trace_id: self.trace_id.clone(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Error::invalid_request("a"), ErrorCode::InvalidRequest, true)]
    #[case(Error::unauthorized("a"), ErrorCode::Unauthorized, true)]
    #[case(Error::service_unavailable("a"), ErrorCode::ServiceUnavailable, true)]
    #[case(Error::internal("a"), ErrorCode::InternalError, false)]
    fn constructors_set_code(
        #[case] error: Error,
        #[case] expected: ErrorCode,
        #[case] client_facing: bool,
    ) {
        assert_eq!(error.code(), expected);
        assert_eq!(expected.is_client_facing(), client_facing);
    }

    #[test]
    fn serialises_in_camel_case_and_skips_empty_fields() {
        let error = Error::invalid_request("bad").with_trace_id("abc");
        let value = serde_json::to_value(&error).expect("serialise error");
        assert_eq!(
            value,
            json!({ "code": "invalid_request", "message": "bad", "traceId": "abc" })
        );
    }

    #[test]
    fn accepts_snake_case_trace_id_alias() {
        let error: Error = serde_json::from_value(json!({
            "code": "unauthorized",
            "message": "invalid token",
            "trace_id": "xyz"
        }))
        .expect("deserialise error");
        assert_eq!(error.trace_id(), Some("xyz"));
    }

    #[test]
    fn public_view_hides_internal_detail_only() {
        let internal = Error::internal("postgres://user:pw@db refused")
            .with_trace_id("t-1")
            .with_details(json!({ "sql": "SELECT" }));
        let shown = internal.public_view();
        assert_eq!(shown.message(), "Internal server error");
        assert_eq!(shown.trace_id(), Some("t-1"));
        assert!(shown.details().is_none());

        let client = Error::invalid_request("dias is required").with_details(json!({ "field": "dias" }));
        assert_eq!(client.public_view(), client);
    }

    #[tokio::test]
    async fn captures_trace_id_in_scope() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000001"
            .parse()
            .expect("valid uuid");
        let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
        assert_eq!(error.trace_id(), Some(trace_id.to_string().as_str()));
    }
}
