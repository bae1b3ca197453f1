//! Request-shape checks shared by the HTTP handlers.
//!
//! Request DTOs keep every field optional so a missing field produces a
//! domain `invalid_request` naming it, rather than a serde message.

use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

/// JSON field name as the client spelled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

/// Unwrap a required value, treating blank strings as missing.
pub(crate) fn require_field(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

/// Unwrap a required non-string value.
pub(crate) fn require_value<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a typed id, naming `field` in the failure details.
///
/// The domain parsers report the generic `id` field; this rewrites the
/// details so body fields like `gigId` point at the right key.
pub(crate) fn parse_id<T>(
    raw: &str,
    field: FieldName,
    parse: impl FnOnce(&str) -> Result<T, Error>,
) -> Result<T, Error> {
    parse(raw).map_err(|err| {
        let message = err.message().to_owned();
        Error::invalid_request(message).with_details(json!({
            "field": field.as_str(),
            "value": raw,
            "code": ErrorCode::InvalidId.as_str(),
        }))
    })
}
