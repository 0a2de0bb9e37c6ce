//! Tests for the transport-agnostic domain error.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("no token"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::unprocessable("rejected"), ErrorCode::UnprocessableEntity)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn try_new_rejects_blank_messages(#[case] message: &str) {
    let result = Error::try_new(ErrorCode::InternalError, message);
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn details_are_attached_unchanged() {
    let details = json!({ "field": "email", "code": "email_taken" });
    let error = Error::unprocessable("email already registered").with_details(details.clone());

    assert_eq!(error.code(), ErrorCode::UnprocessableEntity);
    assert_eq!(error.details(), Some(&details));
}

#[rstest]
fn error_code_serialises_as_snake_case() {
    let value = serde_json::to_value(ErrorCode::UnprocessableEntity).expect("serialise code");
    assert_eq!(value, json!("unprocessable_entity"));
}

#[rstest]
fn display_uses_message() {
    let error = Error::not_found("user not found");
    assert_eq!(error.to_string(), "user not found");
}
