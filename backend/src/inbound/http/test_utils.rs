//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockLoginService, MockRegistrationService, MockTokenService, MockUserProfileQuery,
    TokenError,
};
use crate::domain::{TokenClaims, UserId};

use super::state::HttpState;

/// Bundle driving-port mocks into handler state.
pub fn mock_state(
    registration: MockRegistrationService,
    login: MockLoginService,
    profile: MockUserProfileQuery,
) -> HttpState {
    HttpState::new(Arc::new(registration), Arc::new(login), Arc::new(profile))
}

/// Token verifier accepting the literal token `valid` for `subject`.
pub fn tokens_for(subject: UserId) -> MockTokenService {
    let mut tokens = MockTokenService::new();
    tokens.expect_verify().returning(move |token| {
        if token == "valid" {
            Ok(TokenClaims::new(subject.clone(), 0, None))
        } else {
            Err(TokenError::invalid("signature mismatch"))
        }
    });
    tokens
}
