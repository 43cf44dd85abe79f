//! Driven port for the external identity provider.
//!
//! The provider owns sessions: it trades authorization codes for tokens and
//! revokes them on sign-out. Adapters translate transport failures into
//! [`IdentityProviderError`].

use async_trait::async_trait;

use crate::domain::{AuthSession, CodeExchange, SessionToken};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider refused the code or token.
        Rejected => "identity provider rejected the request: {message}",
        /// The provider did not answer in time.
        Timeout => "identity provider timed out: {message}",
        /// The provider could not be reached or failed.
        Transport => "identity provider request failed: {message}",
        /// The provider answered with an unexpected payload.
        Decode => "identity provider response was malformed: {message}",
    }
}

/// Port for session exchange and revocation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Trade an authorization code for a session.
    async fn exchange_code(
        &self,
        exchange: &CodeExchange,
    ) -> Result<AuthSession, IdentityProviderError>;

    /// Revoke the session identified by `access_token`.
    ///
    /// Revoking an already invalid token is not an error.
    async fn sign_out(&self, access_token: &SessionToken) -> Result<(), IdentityProviderError>;
}
