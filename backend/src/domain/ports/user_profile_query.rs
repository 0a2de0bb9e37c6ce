//! Driving port for user profile queries.
//!
//! Inbound adapters use this port to load a user's profile without importing
//! persistence details.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading a profile on behalf of an authenticated user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the profile of `user_id` as seen by `requester`.
    ///
    /// Requesters may only read their own profile; anything else fails with
    /// `forbidden` before storage is consulted.
    async fn fetch_profile(&self, requester: &UserId, user_id: &UserId) -> Result<User, Error>;
}
