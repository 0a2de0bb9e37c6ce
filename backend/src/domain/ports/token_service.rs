//! Port for issuing and verifying bearer tokens.

use crate::domain::{AccessToken, TokenClaims, UserId};

/// Failures raised by token adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token could not be signed.
    #[error("token signing failed: {message}")]
    Signing { message: String },
    /// The token is malformed, tampered with, or expired.
    #[error("token rejected: {message}")]
    Invalid { message: String },
}

impl TokenError {
    /// Create a signing error with the given message.
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Create a rejection error with the given message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Signs and verifies bearer tokens carrying a user identifier.
///
/// Signing is cheap and synchronous, so unlike the other ports this trait is
/// not async.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a signed token whose subject is `subject`.
    fn issue(&self, subject: &UserId) -> Result<AccessToken, TokenError>;

    /// Check the signature and integrity of `token` and return its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
