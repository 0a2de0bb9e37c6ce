//! Response bodies shared by the HTTP handlers.
//!
//! These wrap domain values in the JSON shapes clients see. Error bodies live
//! in [`super::error::ErrorResponse`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;

/// Body carrying a single human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User created successfully!")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful login body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Authenticated.")]
    pub message: String,
    /// Signed bearer token for the `Authorization` header.
    pub token: String,
}

/// Profile body wrapping the public user view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}
