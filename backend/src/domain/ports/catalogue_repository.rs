//! Driven port for the university and career catalogue.

use async_trait::async_trait;

use crate::domain::{Career, ReferenceId, University};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue repository adapters.
    pub enum CatalogueRepositoryError {
        /// The store could not be reached.
        Connection => "catalogue store connection failed: {message}",
        /// The store refused or failed the query.
        Query => "catalogue store query failed: {message}",
    }
}

/// Port for catalogue reads. The catalogue is public data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// All universities ordered by name.
    async fn list_universities(&self) -> Result<Vec<University>, CatalogueRepositoryError>;

    /// Careers of one university ordered by name.
    async fn list_careers(
        &self,
        university_id: &ReferenceId,
    ) -> Result<Vec<Career>, CatalogueRepositoryError>;

    /// Look a career up by id.
    async fn find_career(
        &self,
        career_id: &ReferenceId,
    ) -> Result<Option<Career>, CatalogueRepositoryError>;
}
