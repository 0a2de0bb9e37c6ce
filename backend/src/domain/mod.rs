//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed account entities used by the HTTP and
//! persistence layers, plus the service that enforces account rules. Types
//! are immutable once validated; serialisation contracts are documented on
//! each type.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserAccount, UserId, Username, EmailAddress, PasswordHash.
//! - LoginCredentials, Registration: validated command inputs.
//! - AccessToken, TokenClaims: bearer token value and verified claims.
//! - AccountService: implementation of the driving ports.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod ports;
pub mod token;
pub mod user;

pub use self::accounts::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::token::{AccessToken, TokenClaims};
pub use self::user::{
    EmailAddress, PasswordHash, User, UserAccount, UserId, UserValidationError, Username,
};
