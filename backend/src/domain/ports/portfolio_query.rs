//! Driving port for dashboard and public portfolio reads.

use async_trait::async_trait;

use crate::domain::{AuthSession, DomainError, Portfolio, Username};

/// Use-case port returning assembled portfolios.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioQuery: Send + Sync {
    /// Public portfolio by handle; `NotFound` when no profile matches.
    async fn public_portfolio(&self, username: &Username) -> Result<Portfolio, DomainError>;

    /// Portfolio of the signed-in user.
    async fn dashboard(&self, session: &AuthSession) -> Result<Portfolio, DomainError>;
}
