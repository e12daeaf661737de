//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn internal_error_case() -> Error {
    Error::internal("pool returned row with NULL id")
        .with_trace_id(TRACE_ID)
        .with_details(json!({"column": "id"}))
}

#[rstest]
#[case::invalid(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case::not_owned(Error::not_found_or_not_owned("device not found or not owned"), StatusCode::BAD_REQUEST)]
#[case::unauthorized(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case::not_found(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case::conflict(Error::conflict("users_external_uid_key"), StatusCode::CONFLICT)]
#[case::unavailable(Error::service_unavailable("pool timeout"), StatusCode::SERVICE_UNAVAILABLE)]
#[case::internal(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn response_payload(error: Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace id is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (status, header, payload)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(internal_error_case: Error) {
    let (status, header, payload) = response_payload(internal_error_case).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(TRACE_ID));
    assert!(payload.details().is_none());
}

#[actix_web::test]
async fn ownership_failures_keep_their_message() {
    let error = Error::not_found_or_not_owned("pattern not found or not owned").with_trace_id(TRACE_ID);

    let (status, header, payload) = response_payload(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload.code(), ErrorCode::NotFoundOrNotOwned);
    assert_eq!(payload.message(), "pattern not found or not owned");
}

#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "content"}));

    let (_, header, payload) = response_payload(error).await;

    assert!(header.is_none());
    assert_eq!(payload.trace_id(), None);
    assert_eq!(payload.details(), Some(&json!({"field": "content"})));
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let actix_err = actix_web::error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
}

#[actix_web::test]
async fn json_errors_become_invalid_request() {
    let request = TestRequest::default().to_http_request();

    let error = json_error_handler(JsonPayloadError::ContentType, &request);

    assert_eq!(error.as_response_error().status_code(), StatusCode::BAD_REQUEST);
    let response = error.error_response();
    let bytes = to_bytes(response.into_body()).await.expect("body");
    let payload: Error = serde_json::from_slice(&bytes).expect("error payload");
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.details(), Some(&json!({"code": "content_type"})));
}

#[test]
fn from_actix_error_keeps_wrapped_domain_error() {
    let actix_err: actix_web::Error = Error::invalid_request("missing content").into();

    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "missing content");
}

#[test]
fn from_actix_error_maps_raw_json_failures_to_invalid_request() {
    let actix_err: actix_web::Error = JsonPayloadError::ContentType.into();

    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}
