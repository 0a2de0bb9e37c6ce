//! Port for one-way password hashing.
//!
//! Hashing is deliberately slow, so adapters are expected to move the work
//! off the async executor.

use async_trait::async_trait;

use crate::domain::PasswordHash;

/// Failures raised by password hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Producing a hash failed.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    /// The stored hash could not be parsed or compared.
    #[error("password verification failed: {message}")]
    Verify { message: String },
}

impl PasswordHashError {
    /// Create a hashing error with the given message.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Create a verification error with the given message.
    pub fn verify(message: impl Into<String>) -> Self {
        Self::Verify {
            message: message.into(),
        }
    }
}

/// Salted one-way password hashing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a freshly generated salt.
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Return whether `password` matches the stored `hash`.
    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError>;
}
