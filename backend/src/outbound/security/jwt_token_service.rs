//! `TokenService` issuing HS256 JSON Web Tokens.
//!
//! Claims carry the user id as `sub` and the issue time as `iat`. `exp` is
//! only present when a lifetime is configured; tokens without it never
//! expire.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AccessToken, TokenClaims, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<u64>,
}

/// HS256 token signer and verifier sharing one secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl JwtTokenService {
    /// Create a service signing with `secret`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` when the secret is empty.
    pub fn new(secret: &[u8], ttl: Option<Duration>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::signing("token secret must not be empty"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }
}

fn unix_now() -> Result<u64, TokenError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|err| TokenError::signing(err.to_string()))
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &UserId) -> Result<AccessToken, TokenError> {
        let iat = unix_now()?;
        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp: self.ttl.map(|ttl| iat.saturating_add(ttl.as_secs())),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?;
        let subject =
            UserId::new(&data.claims.sub).map_err(|err| TokenError::invalid(err.to_string()))?;

        Ok(TokenClaims::new(subject, data.claims.iat, data.claims.exp))
    }
}
