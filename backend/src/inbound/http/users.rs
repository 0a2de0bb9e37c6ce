//! Account API handlers.
//!
//! ```text
//! POST /auth/register {"username":"ada","email":"ada@example.com","password":"pw","confirmPassword":"pw"}
//! POST /auth/login    {"email":"ada@example.com","password":"pw"}
//! GET  /users/{id}    Authorization: Bearer <token>
//! ```
//!
//! Absent or `null` fields deserialise as empty strings and fail validation
//! with 422; values of the wrong JSON type fail body parsing with 400.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
    UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::schemas::{LoginResponse, MessageResponse, UserResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    map_login_validation_error, map_registration_validation_error,
};

/// Registration body for `POST /auth/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "ada")]
    pub username: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.username.as_deref().unwrap_or_default(),
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
            value.confirm_password.as_deref().unwrap_or_default(),
        )
    }
}

/// Login body for `POST /auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 422, description = "Missing field, password mismatch or email taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Credential store unavailable", body = ErrorResponse)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())
        .map_err(map_registration_validation_error)?;
    state.registration.register(&registration).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("User created successfully!")))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "Unknown email", body = ErrorResponse),
        (status = 422, description = "Missing field or wrong password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let token = state.login.authenticate(&credentials).await?;
    Ok(web::Json(LoginResponse {
        message: "Authenticated.".to_owned(),
        token: token.into(),
    }))
}

/// Fetch the caller's own profile.
///
/// A path segment that is not a user id is reported like an unknown user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 400, description = "Invalid token", body = ErrorResponse),
        (status = 401, description = "Missing bearer token", body = ErrorResponse),
        (status = 403, description = "Token belongs to another user", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security(("bearer" = []))
)]
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = UserId::new(path.into_inner()).map_err(|err| {
        debug!(error = %err, "profile path is not a user id");
        Error::not_found("user not found")
    })?;
    let user = state
        .profile
        .fetch_profile(caller.user_id(), &user_id)
        .await?;
    Ok(web::Json(UserResponse { user }))
}
