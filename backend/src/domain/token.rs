//! Bearer token values exchanged with clients.

use std::fmt;

use super::UserId;

/// Signed bearer token returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token as sent in the `Authorization` header.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

/// Verified token contents.
///
/// Only produced by a token service after the signature has been checked, so
/// holding a value of this type means the subject is authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    subject: UserId,
    issued_at: u64,
    expires_at: Option<u64>,
}

impl TokenClaims {
    /// Assemble claims from verified parts. Timestamps are Unix seconds.
    pub fn new(subject: UserId, issued_at: u64, expires_at: Option<u64>) -> Self {
        Self {
            subject,
            issued_at,
            expires_at,
        }
    }

    /// Authenticated user.
    pub fn subject(&self) -> &UserId {
        &self.subject
    }

    /// Issue time in Unix seconds.
    pub fn issued_at(&self) -> u64 {
        self.issued_at
    }

    /// Expiry in Unix seconds; `None` for tokens without a lifetime.
    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn access_token_debug_hides_value() {
        let token = AccessToken::new("header.payload.signature");
        assert_eq!(format!("{token:?}"), "AccessToken(<redacted>)");
        assert_eq!(String::from(token), "header.payload.signature");
    }
}
