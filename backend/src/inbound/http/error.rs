//! Mapping from domain [`Error`] values to JSON HTTP responses.
//!
//! Server-side failures are logged here with their original message and
//! returned to clients with a generic one. Extractor failures (bad JSON,
//! bad query strings) are folded into `invalid_request` so every error body
//! has the same shape.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client-facing copy of `error`. Server faults lose message and details.
fn public_view(error: &Error) -> Error {
    let replacement = match error.code() {
        ErrorCode::InternalError => Error::internal("Internal server error"),
        ErrorCode::ServiceUnavailable => {
            Error::service_unavailable("Service temporarily unavailable")
        }
        _ => return error.clone(),
    };
    match error.trace_id() {
        Some(id) => replacement.with_trace_id(id.to_owned()),
        None => replacement,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                code = ?self.code(),
                trace_id = self.trace_id().unwrap_or_default(),
                error = self.message(),
                "request failed"
            );
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(public_view(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// `JsonConfig` error handler turning body failures into `invalid_request`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected JSON payload");
    let (message, code) = match &err {
        JsonPayloadError::ContentType => ("Content-Type must be application/json", "content_type"),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            ("request body is too large", "payload_too_large")
        }
        _ => ("request body is not valid JSON for this endpoint", "invalid_json"),
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": code, "reason": err.to_string() }))
        .into()
}

/// `QueryConfig` error handler turning query-string failures into
/// `invalid_request`.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected query string");
    Error::invalid_request("query string is malformed")
        .with_details(json!({ "code": "invalid_query", "reason": err.to_string() }))
        .into()
}
