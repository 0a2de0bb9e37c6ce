//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `RegistrationService`, `UserProfileQuery`)
//! are called by inbound adapters. Driven ports (`UserRepository`,
//! `PasswordHasher`, `TokenService`) are implemented by outbound adapters.

mod login_service;
mod password_hasher;
mod registration_service;
mod token_service;
mod user_profile_query;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
