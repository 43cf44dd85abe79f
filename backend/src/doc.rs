//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the payload schemas they exchange, plus the session cookie security
//! scheme. The document backs Swagger UI in debug builds and is exported by
//! the `openapi-dump` binary for client generation.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Achievement, Career, DomainError, ErrorCode, FrequencyCount, Portfolio, Project,
    PublicProfile, ReferenceId, University,
};
use crate::inbound::http::contact::{ContactRequest, RelayError};
use crate::inbound::http::onboarding::{OnboardingRequest, OnboardingResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by GET /auth/callback.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Prisma backend API",
        description = "Sign-in callback, contact relay, onboarding and portfolio endpoints.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::callback,
        crate::inbound::http::auth::signout,
        crate::inbound::http::contact::send,
        crate::inbound::http::catalogue::list_universities,
        crate::inbound::http::catalogue::list_careers,
        crate::inbound::http::onboarding::complete_onboarding,
        crate::inbound::http::portfolio::dashboard,
        crate::inbound::http::portfolio::public_portfolio,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        ReferenceId,
        University,
        Career,
        Portfolio,
        PublicProfile,
        Project,
        Achievement,
        FrequencyCount,
        ContactRequest,
        RelayError,
        OnboardingRequest,
        OnboardingResponse,
    )),
    tags(
        (name = "auth", description = "Sign-in callback and sign-out"),
        (name = "contact", description = "Contact form relay"),
        (name = "catalogue", description = "Universities and careers"),
        (name = "onboarding", description = "Academic selection after first sign-in"),
        (name = "portfolio", description = "Dashboard and public profiles"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
