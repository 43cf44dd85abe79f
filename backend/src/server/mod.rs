//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{CollaboratorConfig, ServerConfig};
pub use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use prisma_backend::Trace;
#[cfg(debug_assertions)]
use prisma_backend::doc::ApiDoc;
use prisma_backend::inbound::http::auth::{callback, signout};
use prisma_backend::inbound::http::catalogue::{list_careers, list_universities};
use prisma_backend::inbound::http::contact::send;
use prisma_backend::inbound::http::error::{json_error_handler, not_found};
use prisma_backend::inbound::http::health::{HealthState, live, ready};
use prisma_backend::inbound::http::onboarding::complete_onboarding;
use prisma_backend::inbound::http::portfolio::{dashboard, public_portfolio};
use prisma_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Shared pieces every worker's [`App`] is built from.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Assemble routes and middleware.
///
/// The session middleware wraps the whole app because both the `/auth`
/// handlers and the versioned API read the cookie.
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
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let auth = web::scope("/auth").service(callback).service(signout);

    let api = web::scope("/api/v1")
        .service(list_universities)
        .service(list_careers)
        .service(complete_onboarding)
        .service(dashboard)
        .service(public_portfolio);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(session)
        .wrap(Trace)
        .service(auth)
        .service(send)
        .service(api)
        .service(ready)
        .service(live)
        .default_service(web::to(not_found));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when building the adapters, binding the
/// socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        session,
        bind_addr,
        collaborators,
    } = config;
    let http_state = web::Data::new(build_http_state(&collaborators)?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: session.key.clone(),
            cookie_secure: session.cookie_secure,
            same_site: session.same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
