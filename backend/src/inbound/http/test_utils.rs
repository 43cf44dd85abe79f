//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, config::CookieContentSecurity, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::domain::ports::{
    MockCatalogueQuery, MockContactRelay, MockOnboardingCommand, MockPortfolioQuery,
    MockSignInCallback, MockSignOutCommand,
};
use crate::domain::{AuthSession, Deployment, SessionToken, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{CallbackSettings, HttpState, HttpStatePorts};

/// Cookie name used by the session middleware in tests.
pub const SESSION_COOKIE: &str = "session";

/// Session middleware configured for tests: fresh key, encrypted content,
/// `Secure` disabled for plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Mocked driving ports for handler tests. Unset expectations fail loudly if
/// a handler reaches a port it should not touch.
#[derive(Default)]
pub struct MockPorts {
    pub sign_in: MockSignInCallback,
    pub sign_out: MockSignOutCommand,
    pub contact: MockContactRelay,
    pub catalogue: MockCatalogueQuery,
    pub onboarding: MockOnboardingCommand,
    pub portfolio: MockPortfolioQuery,
}

impl MockPorts {
    /// Wrap the mocks in shareable handler state.
    pub fn into_state(self, deployment: Deployment) -> web::Data<HttpState> {
        let ports = HttpStatePorts {
            sign_in: Arc::new(self.sign_in),
            sign_out: Arc::new(self.sign_out),
            contact: Arc::new(self.contact),
            catalogue: Arc::new(self.catalogue),
            onboarding: Arc::new(self.onboarding),
            portfolio: Arc::new(self.portfolio),
        };
        web::Data::new(HttpState::new(
            ports,
            CallbackSettings {
                deployment,
                code_verifier_cookie: CODE_VERIFIER_COOKIE.to_owned(),
            },
        ))
    }
}

/// Verifier cookie name used by handler tests.
pub const CODE_VERIFIER_COOKIE: &str = "sb-test-auth-token-code-verifier";

/// A signed-in session for `user_id`.
pub fn signed_in(user_id: &str) -> AuthSession {
    AuthSession {
        user_id: Some(UserId::new(user_id).expect("fixture user id")),
        email: Some("ana@example.com".to_owned()),
        access_token: SessionToken::new("access-token").expect("fixture token"),
        expires_at: None,
    }
}

/// User id stored by [`seed_session`].
pub const TEST_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Handler storing [`signed_in`] for [`TEST_USER_ID`]; mount it to obtain a
/// session cookie.
pub async fn seed_session(session: SessionContext) -> ApiResult<HttpResponse> {
    session.persist_session(&signed_in(TEST_USER_ID))?;
    Ok(HttpResponse::Ok().finish())
}
