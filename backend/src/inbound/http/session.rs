//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The encrypted cookie session carries the identity provider's
//! [`AuthSession`]. Handlers only persist, read, require or purge it.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AuthSession, DomainError};

pub(crate) const AUTH_SESSION_KEY: &str = "auth";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the identity provider session in the cookie.
    pub fn persist_session(&self, session: &AuthSession) -> Result<(), DomainError> {
        self.0.renew();
        self.0
            .insert(AUTH_SESSION_KEY, session)
            .map_err(|error| DomainError::internal(format!("failed to persist session: {error}")))
    }

    /// Stored session, if any. Undecodable cookies read as signed out.
    pub fn session(&self) -> Option<AuthSession> {
        match self.0.get::<AuthSession>(AUTH_SESSION_KEY) {
            Ok(session) => session,
            Err(error) => {
                warn!(%error, "discarding unreadable session cookie");
                None
            }
        }
    }

    /// Require a live session or return `401 Unauthorized`.
    pub fn require_session(&self) -> Result<AuthSession, DomainError> {
        match self.session() {
            Some(session) if !session.is_expired_at(Utc::now()) => Ok(session),
            Some(_) => Err(DomainError::unauthorized("session expired")),
            None => Err(DomainError::unauthorized("login required")),
        }
    }

    /// Drop everything stored in the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
