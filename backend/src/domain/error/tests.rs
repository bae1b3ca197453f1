//! Tests for the domain error payload.

use super::*;
use crate::domain::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::conflict("x"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::conflict("duplicate") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn try_from_error_dto_clears_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let dto = ErrorDto {
        code: ErrorCode::InvalidRequest,
        message: "bad".to_owned(),
        trace_id: None,
        details: None,
    };

    let error = TraceId::scope(trace_id, async move {
        Error::try_from(dto).expect("conversion succeeds for valid payload without trace")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_payload(expected_trace_id: String) {
    let error = Error::invalid_request("missing title")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "title", "code": "missing_field"}));

    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["message"], "missing title");
    assert_eq!(value["traceId"], expected_trace_id);
    assert_eq!(value["details"]["field"], "title");
}

#[rstest]
fn deserialisation_rejects_blank_message() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({"code": "not_found", "message": "  "}));
    assert!(result.is_err());
}

#[rstest]
fn round_trips_through_json(base_error: Error) {
    let encoded = serde_json::to_string(&base_error).expect("serialise");
    let decoded: Error = serde_json::from_str(&encoded).expect("deserialise");
    assert_eq!(decoded, base_error);
}

#[rstest]
#[case("unauthorized")]
#[case("forbidden")]
fn codes_without_a_marketplace_meaning_do_not_parse(#[case] code: &str) {
    let result: Result<ErrorCode, _> = serde_json::from_value(json!(code));
    assert!(result.is_err(), "{code} should not be an error code");
}
