//! Bearer-token authentication for protected routes.
//!
//! [`BearerAuth`] verifies the `Authorization: Bearer <token>` header before
//! the wrapped handlers run and stores the verified [`TokenClaims`] in the
//! request extensions. Handlers read them through [`AuthenticatedUser`]
//! instead of trusting identifiers from the path.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{AUTHORIZATION, HeaderValue};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::ports::TokenService;
use crate::domain::{Error, TokenClaims, UserId};

const ACCESS_DENIED: &str = "Access denied";
const INVALID_TOKEN: &str = "Invalid token";

/// Extract the token from an `Authorization` header value.
///
/// Missing headers, non-UTF-8 values, other schemes and empty tokens are all
/// reported as `unauthorized`. The scheme name is matched case-insensitively.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, Error> {
    let value = header
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized(ACCESS_DENIED))?;
    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized(ACCESS_DENIED))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(Error::unauthorized(ACCESS_DENIED));
    }
    Ok(token)
}

/// Verify the bearer token carried by `header`.
pub fn authorize(
    header: Option<&HeaderValue>,
    tokens: &dyn TokenService,
) -> Result<TokenClaims, Error> {
    let token = bearer_token(header)?;
    tokens.verify(token).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::invalid_request(INVALID_TOKEN)
    })
}

/// Middleware requiring a valid bearer token.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use accounts_backend::inbound::http::auth::BearerAuth;
/// use accounts_backend::outbound::security::JwtTokenService;
///
/// let tokens = Arc::new(JwtTokenService::new(b"secret", None).expect("secret is non-empty"));
/// let app = App::new().service(web::scope("/users").wrap(BearerAuth::new(tokens)));
/// ```
#[derive(Clone)]
pub struct BearerAuth {
    tokens: Arc<dyn TokenService>,
}

impl BearerAuth {
    /// Create the middleware around a token verifier.
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

/// Service wrapper produced by [`BearerAuth`].
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<dyn TokenService>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = authorize(req.headers().get(AUTHORIZATION), self.tokens.as_ref());
        match outcome {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                // Rendered here so the body picks up the caller's trace scope.
                let res = req.error_response(err).map_into_right_body();
                Box::pin(ready(Ok(res)))
            }
        }
    }
}

/// Verified identity of the caller on routes behind [`BearerAuth`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(TokenClaims);

impl AuthenticatedUser {
    /// User id carried in the token subject.
    pub fn user_id(&self) -> &UserId {
        self.0.subject()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<TokenClaims>().cloned();
        ready(
            claims
                .map(AuthenticatedUser)
                .ok_or_else(|| Error::unauthorized(ACCESS_DENIED)),
        )
    }
}
