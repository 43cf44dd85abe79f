//! Driving ports for finishing and ending a sign-in.

use async_trait::async_trait;

use crate::domain::{AuthSession, CodeExchange, Destination, NextPath};

/// Result of the authorization-code callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutcome {
    /// Where the browser goes next.
    pub destination: Destination,
    /// Session to persist; `None` when the exchange failed.
    pub session: Option<AuthSession>,
}

impl SignInOutcome {
    /// Outcome of a failed or impossible exchange.
    pub fn rejected() -> Self {
        Self {
            destination: Destination::AuthError,
            session: None,
        }
    }
}

/// Use-case port for the authorization-code callback.
///
/// Never fails: every path ends in a [`Destination`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignInCallback: Send + Sync {
    /// Exchange the code and decide where the user lands.
    async fn complete_sign_in(&self, exchange: CodeExchange, next: NextPath) -> SignInOutcome;
}

/// Use-case port for signing out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignOutCommand: Send + Sync {
    /// Revoke `session` upstream when there is one. Best effort.
    async fn sign_out(&self, session: Option<AuthSession>);
}
