//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for registering new accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account for a validated registration and return its public view.
    ///
    /// A taken email fails with `unprocessable_entity`.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
