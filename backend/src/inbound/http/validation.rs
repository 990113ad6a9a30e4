//! Validation error builders shared by HTTP handlers.

use serde_json::json;

use crate::domain::Error;

/// Machine-readable validation codes placed in error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    EmptyEmail,
    EmptyPassword,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyEmail => "empty_email",
            Self::EmptyPassword => "empty_password",
        }
    }
}

/// Request body field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

/// Build an `invalid_request` error naming the offending field.
pub(crate) fn field_error(
    field: FieldName,
    code: ValidationCode,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.0,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {}", field.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn missing_field_names_the_field() {
        let err = missing_field_error(FieldName::new("refresh"));
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "missing required field: refresh");
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "refresh", "code": "missing_field" }))
        );
    }

    #[test]
    fn field_error_uses_given_code() {
        let err = field_error(
            FieldName::new("password"),
            ValidationCode::EmptyPassword,
            "password must not be empty",
        );
        assert_eq!(err.details().and_then(|d| d.get("code")), Some(&json!("empty_password")));
    }
}
