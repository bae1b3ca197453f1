//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing state, such as a repeat application.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is unreachable; retrying later may succeed.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: title")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "6f1c1fd4-53f4-4cf6-9c1a-3c4f1b8f4a10")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::RequestStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RequestStatus)]
pub enum RequestStatusSchema {
    /// Awaiting a decision.
    #[schema(rename = "pending")]
    Pending,
    /// Approved by the recipient.
    #[schema(rename = "accepted")]
    Accepted,
    /// Declined by the recipient.
    #[schema(rename = "rejected")]
    Rejected,
}
