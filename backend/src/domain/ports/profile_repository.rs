//! Driven port for the `profiles` table of the external store.

use async_trait::async_trait;

use crate::domain::{AcademicSelection, ProfileCompleteness, SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// The store could not be reached.
        Connection => "profile store connection failed: {message}",
        /// The store refused or failed the query.
        Query => "profile store query failed: {message}",
        /// Rows could not be decoded.
        Decode => "profile store returned malformed rows: {message}",
    }
}

/// Port for reading and updating a user's own profile row.
///
/// Calls run with the user's access token so row-level security applies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch only the completeness columns. `None` when no row exists.
    async fn fetch_completeness(
        &self,
        user_id: &UserId,
        access_token: &SessionToken,
    ) -> Result<Option<ProfileCompleteness>, ProfileRepositoryError>;

    /// Store the onboarding selection on the user's row.
    async fn save_academic_selection(
        &self,
        user_id: &UserId,
        access_token: &SessionToken,
        selection: &AcademicSelection,
    ) -> Result<(), ProfileRepositoryError>;
}
