//! Driven port for portfolio records: profiles, projects, achievements.

use async_trait::async_trait;

use crate::domain::{Achievement, Project, PublicProfile, SessionToken, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by portfolio repository adapters.
    pub enum PortfolioRepositoryError {
        /// The store could not be reached.
        Connection => "portfolio store connection failed: {message}",
        /// The store refused or failed the query.
        Query => "portfolio store query failed: {message}",
        /// Rows could not be decoded.
        Decode => "portfolio store returned malformed rows: {message}",
    }
}

/// Port for portfolio reads.
///
/// `access_token` is `None` for anonymous public reads; adapters then fall
/// back to the store's anonymous credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    /// Public profile by handle.
    async fn find_profile_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<PublicProfile>, PortfolioRepositoryError>;

    /// Public profile by user id.
    async fn find_profile_by_id(
        &self,
        user_id: &UserId,
        access_token: Option<SessionToken>,
    ) -> Result<Option<PublicProfile>, PortfolioRepositoryError>;

    /// All projects of a user.
    async fn list_projects(
        &self,
        user_id: &UserId,
        access_token: Option<SessionToken>,
    ) -> Result<Vec<Project>, PortfolioRepositoryError>;

    /// All achievements of a user.
    async fn list_achievements(
        &self,
        user_id: &UserId,
        access_token: Option<SessionToken>,
    ) -> Result<Vec<Achievement>, PortfolioRepositoryError>;
}
