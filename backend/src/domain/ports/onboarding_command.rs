//! Driving ports behind the onboarding form.

use async_trait::async_trait;

use crate::domain::{AcademicSelection, AuthSession, Career, Destination, DomainError};
use crate::domain::{ReferenceId, University};

/// Use-case port listing the options the onboarding form offers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// Universities ordered by name.
    async fn universities(&self) -> Result<Vec<University>, DomainError>;

    /// Careers of `university_id` ordered by name.
    async fn careers(&self, university_id: &ReferenceId) -> Result<Vec<Career>, DomainError>;
}

/// Use-case port saving the onboarding selection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OnboardingCommand: Send + Sync {
    /// Store the selection for the session's user and return the next page.
    async fn complete_onboarding(
        &self,
        session: &AuthSession,
        selection: AcademicSelection,
    ) -> Result<Destination, DomainError>;
}
