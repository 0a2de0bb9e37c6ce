//! Authentication primitives such as login credentials and registrations.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Each constructor checks fields in a fixed order and reports only the first
//! failure.

use std::fmt;

use zeroize::Zeroizing;

use super::{EmailAddress, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use accounts_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@example.com", "secret").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::EmptyEmail)?;

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when a registration payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    EmptyUsername,
    EmptyEmail,
    EmptyPassword,
    EmptyPasswordConfirmation,
    PasswordMismatch,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyPasswordConfirmation => {
                write!(f, "password confirmation must not be empty")
            }
            Self::PasswordMismatch => {
                write!(f, "password and password confirmation do not match")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated sign-up request.
///
/// The confirmation has already been compared against the password, so only
/// the password itself is retained.
///
/// # Examples
/// ```
/// use accounts_backend::domain::{Registration, RegistrationValidationError};
///
/// let err = Registration::try_from_parts("ada", "ada@example.com", "a", "b").unwrap_err();
/// assert_eq!(err, RegistrationValidationError::PasswordMismatch);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw sign-up inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username =
            Username::new(username).map_err(|_| RegistrationValidationError::EmptyUsername)?;
        let email = EmailAddress::new(email).map_err(|_| RegistrationValidationError::EmptyEmail)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        if password_confirmation.is_empty() {
            return Err(RegistrationValidationError::EmptyPasswordConfirmation);
        }
        if password != password_confirmation {
            return Err(RegistrationValidationError::PasswordMismatch);
        }

        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Email the account will log in with.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password to hash.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("ada@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  ada@example.com  ", "secret")]
    #[case("alice@example.com", " correct horse battery staple ")]
    fn valid_credentials_trim_email(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), email.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("", "", "", "", RegistrationValidationError::EmptyUsername)]
    #[case("ada", "", "", "", RegistrationValidationError::EmptyEmail)]
    #[case("ada", "ada@example.com", "", "", RegistrationValidationError::EmptyPassword)]
    #[case(
        "ada",
        "ada@example.com",
        "secret",
        "",
        RegistrationValidationError::EmptyPasswordConfirmation
    )]
    #[case(
        "ada",
        "ada@example.com",
        "secret",
        "Secret",
        RegistrationValidationError::PasswordMismatch
    )]
    fn registration_reports_first_failure_in_order(
        #[case] username: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] confirmation: &str,
        #[case] expected: RegistrationValidationError,
    ) {
        let err = Registration::try_from_parts(username, email, password, confirmation)
            .expect_err("invalid registration must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn registration_keeps_password_verbatim() {
        let registration =
            Registration::try_from_parts(" ada ", "ada@example.com", " pw ", " pw ")
                .expect("valid registration");
        assert_eq!(registration.username().as_ref(), "ada");
        assert_eq!(registration.email().as_ref(), "ada@example.com");
        assert_eq!(registration.password(), " pw ");
    }
}
