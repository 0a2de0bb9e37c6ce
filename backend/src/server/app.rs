//! Application factory shared by the binary and the end-to-end tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use accounts_backend::Trace;
#[cfg(debug_assertions)]
use accounts_backend::doc::ApiDoc;
use accounts_backend::domain::ports::TokenService;
use accounts_backend::inbound::http::auth::BearerAuth;
use accounts_backend::inbound::http::error::json_error_handler;
use accounts_backend::inbound::http::health::{HealthState, live, ready, welcome};
use accounts_backend::inbound::http::state::HttpState;
use accounts_backend::inbound::http::users::{get_user, login, register};

/// Shared state handed to every worker's application instance.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub tokens: Arc<dyn TokenService>,
}

/// Assemble routes, extractor configuration and middleware.
///
/// `Trace` is wrapped last so the trace scope encloses the bearer check and
/// body parsing, and their error bodies carry the trace id.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        tokens,
    } = deps;

    let json_config = web::JsonConfig::default().error_handler(json_error_handler);

    let auth = web::scope("/auth").service(register).service(login);
    let users = web::scope("/users")
        .wrap(BearerAuth::new(tokens))
        .service(get_user);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config)
        .wrap(Trace)
        .service(welcome)
        .service(ready)
        .service(live)
        .service(auth)
        .service(users);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}
