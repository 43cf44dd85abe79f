//! Sign-in callback and sign-out services.
//!
//! These implement the [`SignInCallback`] and [`SignOutCommand`] driving
//! ports. Neither surfaces an error to the caller: the callback always ends
//! in a [`Destination`] and sign-out is best effort.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    IdentityProvider, ProfileRepository, SignInCallback, SignInOutcome, SignOutCommand,
};
use crate::domain::{AuthSession, CodeExchange, Destination, NextPath};

/// Service deciding where a freshly signed-in user lands.
#[derive(Clone)]
pub struct AuthCallbackService<I, P> {
    identity: Arc<I>,
    profiles: Arc<P>,
}

impl<I, P> AuthCallbackService<I, P> {
    /// Create a service over the identity provider and profile store.
    pub fn new(identity: Arc<I>, profiles: Arc<P>) -> Self {
        Self { identity, profiles }
    }
}

impl<I, P> AuthCallbackService<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    async fn destination_for(&self, session: &AuthSession, next: NextPath) -> Destination {
        let Some(user_id) = session.user_id.as_ref() else {
            debug!("exchange returned no user; falling back to next");
            return Destination::Next(next);
        };

        match self
            .profiles
            .fetch_completeness(user_id, &session.access_token)
            .await
        {
            Ok(profile) => Destination::for_profile(profile.as_ref()),
            Err(err) => {
                warn!(%user_id, error = %err, "profile lookup failed after sign-in");
                Destination::Next(next)
            }
        }
    }
}

#[async_trait]
impl<I, P> SignInCallback for AuthCallbackService<I, P>
where
    I: IdentityProvider,
    P: ProfileRepository,
{
    async fn complete_sign_in(&self, exchange: CodeExchange, next: NextPath) -> SignInOutcome {
        let session = match self.identity.exchange_code(&exchange).await {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "authorization code exchange failed");
                return SignInOutcome::rejected();
            }
        };

        let destination = self.destination_for(&session, next).await;
        SignInOutcome {
            destination,
            session: Some(session),
        }
    }
}

/// Service revoking sessions with the identity provider.
#[derive(Clone)]
pub struct SignOutService<I> {
    identity: Arc<I>,
}

impl<I> SignOutService<I> {
    /// Create a service over the identity provider.
    pub fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl<I> SignOutCommand for SignOutService<I>
where
    I: IdentityProvider,
{
    async fn sign_out(&self, session: Option<AuthSession>) {
        let Some(session) = session else {
            debug!("sign-out without a session");
            return;
        };
        if let Err(err) = self.identity.sign_out(&session.access_token).await {
            warn!(error = %err, "session revocation failed; clearing cookie anyway");
        }
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
