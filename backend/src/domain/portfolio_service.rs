//! Portfolio read service.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join;

use crate::domain::ports::{PortfolioQuery, PortfolioRepository, PortfolioRepositoryError};
use crate::domain::{AuthSession, DomainError, Portfolio, PublicProfile, SessionToken, Username};

/// Service assembling portfolios from the portfolio repository.
#[derive(Clone)]
pub struct PortfolioService<R> {
    repository: Arc<R>,
}

impl<R> PortfolioService<R> {
    /// Create a new service over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(error: PortfolioRepositoryError) -> DomainError {
    match error {
        PortfolioRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("portfolio store unavailable: {message}"))
        }
        PortfolioRepositoryError::Query { message }
        | PortfolioRepositoryError::Decode { message } => {
            DomainError::internal(format!("portfolio store error: {message}"))
        }
    }
}

impl<R> PortfolioService<R>
where
    R: PortfolioRepository,
{
    async fn assemble(
        &self,
        profile: PublicProfile,
        access_token: Option<SessionToken>,
    ) -> Result<Portfolio, DomainError> {
        let (projects, achievements) = try_join(
            self.repository.list_projects(&profile.id, access_token.clone()),
            self.repository.list_achievements(&profile.id, access_token),
        )
        .await
        .map_err(map_repository_error)?;
        Ok(Portfolio::assemble(profile, projects, achievements))
    }
}

#[async_trait]
impl<R> PortfolioQuery for PortfolioService<R>
where
    R: PortfolioRepository,
{
    async fn public_portfolio(&self, username: &Username) -> Result<Portfolio, DomainError> {
        let profile = self
            .repository
            .find_profile_by_username(username)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::not_found(format!("no profile named {username}")))?;
        self.assemble(profile, None).await
    }

    async fn dashboard(&self, session: &AuthSession) -> Result<Portfolio, DomainError> {
        let user_id = session
            .user_id
            .as_ref()
            .ok_or_else(|| DomainError::unauthorized("session is not bound to a user"))?;
        let token = Some(session.access_token.clone());
        let profile = self
            .repository
            .find_profile_by_id(user_id, token.clone())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::not_found("profile not found"))?;
        self.assemble(profile, token).await
    }
}
