//! Account domain service.
//!
//! Implements the registration, login and profile driving ports on top of the
//! credential store, password hasher and token service ports. Every failure
//! returns immediately; no step runs after an error has been decided.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, RegistrationService, TokenError,
    TokenService, UserPersistenceError, UserProfileQuery, UserRepository,
};
use crate::domain::{
    AccessToken, Error, LoginCredentials, Registration, User, UserAccount, UserId,
};

/// Account service implementing the driving ports.
///
/// Type parameters may be trait objects so the server can pick adapters at
/// runtime.
pub struct AccountService<R: ?Sized, H: ?Sized, T: ?Sized> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R: ?Sized, H: ?Sized, T: ?Sized> AccountService<R, H, T> {
    /// Create a new service from its collaborators.
    pub fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn email_taken() -> Error {
    Error::unprocessable("email is already registered")
        .with_details(json!({ "field": "email", "code": "email_taken" }))
}

fn invalid_password() -> Error {
    Error::unprocessable("invalid password")
        .with_details(json!({ "field": "password", "code": "invalid_password" }))
}

fn user_not_found() -> Error {
    Error::not_found("user not found")
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => email_taken(),
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<R, H, T> RegistrationService for AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_persistence_error)?;
        if existing.is_some() {
            debug!("registration rejected: email already registered");
            return Err(email_taken());
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hash_error)?;

        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().clone(),
        );
        // The store enforces email uniqueness, so a concurrent registration
        // that slipped past the lookup surfaces here as DuplicateEmail.
        self.users
            .insert(&UserAccount::new(user.clone(), password_hash))
            .await
            .map_err(map_persistence_error)?;

        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<R, H, T> LoginService for AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(user_not_found)?;

        let matches = self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user_id = %account.user().id(), "login rejected: password mismatch");
            return Err(invalid_password());
        }

        let token = self
            .tokens
            .issue(account.user().id())
            .map_err(map_token_error)?;
        info!(user_id = %account.user().id(), "user authenticated");
        Ok(token)
    }
}

#[async_trait]
impl<R, H, T> UserProfileQuery for AccountService<R, H, T>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
    T: TokenService + ?Sized,
{
    async fn fetch_profile(&self, requester: &UserId, user_id: &UserId) -> Result<User, Error> {
        if requester != user_id {
            return Err(Error::forbidden("token does not grant access to this user"));
        }

        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(user_not_found)
    }
}

#[cfg(test)]
mod tests;
