//! Small helpers for rejecting blank or out-of-range domain input.

use serde_json::json;

use super::{EmailAddress, Error};

/// Trim `value`, failing when nothing remains.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(
            Error::invalid_request(format!("{field} must not be empty")).with_details(json!({
                "field": field,
                "code": "blank_field",
            })),
        );
    }
    Ok(trimmed.to_owned())
}

/// Parse a required email field, naming the field when it is blank.
pub(crate) fn require_email(field: &'static str, value: &str) -> Result<EmailAddress, Error> {
    EmailAddress::new(value).map_err(|_| {
        Error::invalid_request(format!("{field} is required")).with_details(json!({
            "field": field,
            "code": "missing_email",
        }))
    })
}

/// Trim an optional value, falling back to `default` when absent or blank.
pub(crate) fn text_or_default(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_owned()
}

/// Trim an optional value, mapping blanks to `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
