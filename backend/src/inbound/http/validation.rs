//! Shared validation helpers for inbound HTTP adapters.
//!
//! Field failures are rendered as `unprocessable_entity` with
//! `{field, code}` details.

use serde_json::json;

use crate::domain::{Error, LoginValidationError, RegistrationValidationError};

/// Validation error codes for request body failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    PasswordMismatch,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            ValidationCode::MissingField => "missing_field",
            ValidationCode::PasswordMismatch => "password_mismatch",
        }
    }
}

/// JSON field names as clients send them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const USERNAME: Self = Self("username");
    pub(crate) const EMAIL: Self = Self("email");
    pub(crate) const PASSWORD: Self = Self("password");
    pub(crate) const CONFIRM_PASSWORD: Self = Self("confirmPassword");

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, code: ValidationCode, message: &str) -> Error {
    Error::unprocessable(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field(field: FieldName) -> Error {
    field_error(
        field,
        ValidationCode::MissingField,
        &format!("{} is required", field.as_str()),
    )
}

pub(crate) fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::EmptyUsername => missing_field(FieldName::USERNAME),
        RegistrationValidationError::EmptyEmail => missing_field(FieldName::EMAIL),
        RegistrationValidationError::EmptyPassword => missing_field(FieldName::PASSWORD),
        RegistrationValidationError::EmptyPasswordConfirmation => {
            missing_field(FieldName::CONFIRM_PASSWORD)
        }
        RegistrationValidationError::PasswordMismatch => field_error(
            FieldName::CONFIRM_PASSWORD,
            ValidationCode::PasswordMismatch,
            "password and confirmation do not match",
        ),
    }
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => missing_field(FieldName::EMAIL),
        LoginValidationError::EmptyPassword => missing_field(FieldName::PASSWORD),
    }
}
