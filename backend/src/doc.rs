//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer (welcome,
//! health probes, registration, login and the profile lookup), the request
//! and response schemas, and the bearer token security scheme used by
//! `GET /users/{id}`.
//!
//! The generated document is served by Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ErrorCode, User};
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::schemas::{LoginResponse, MessageResponse, UserResponse};
use crate::inbound::http::users::{LoginRequest, RegisterRequest};

/// Name under which the bearer scheme is registered.
pub const BEARER_SCHEME: &str = "bearer";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Accounts backend API",
        description = "User registration, credential login and bearer-protected profile lookup."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::welcome,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::get_user,
    ),
    components(schemas(
        ErrorResponse,
        ErrorCode,
        User,
        MessageResponse,
        LoginResponse,
        UserResponse,
        RegisterRequest,
        LoginRequest,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "users", description = "Profile lookup for authenticated users"),
        (name = "health", description = "Welcome message and health checks")
    )
)]
pub struct ApiDoc;
