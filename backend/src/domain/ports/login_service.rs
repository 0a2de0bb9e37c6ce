//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange credentials for a bearer token without knowing (or importing) the
//! backing infrastructure. HTTP handler tests substitute a mock instead of
//! wiring persistence, hashing and signing.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return a signed token for the account.
    ///
    /// Unknown emails fail with `not_found`, wrong passwords with
    /// `unprocessable_entity`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;
}
