//! Onboarding domain services.
//!
//! Serves the university/career catalogue and records the student's pick on
//! their profile row.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    CatalogueQuery, CatalogueRepository, CatalogueRepositoryError, OnboardingCommand,
    ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{
    AcademicSelection, AuthSession, Career, Destination, DomainError, ReferenceId, University,
};

/// Service implementing the onboarding driving ports.
#[derive(Clone)]
pub struct OnboardingService<C, P> {
    catalogue: Arc<C>,
    profiles: Arc<P>,
}

impl<C, P> OnboardingService<C, P> {
    /// Create a new service with the given repositories.
    pub fn new(catalogue: Arc<C>, profiles: Arc<P>) -> Self {
        Self {
            catalogue,
            profiles,
        }
    }
}

fn map_catalogue_error(error: CatalogueRepositoryError) -> DomainError {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("catalogue store unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            DomainError::internal(format!("catalogue store error: {message}"))
        }
    }
}

fn map_profile_error(error: ProfileRepositoryError) -> DomainError {
    match error {
        ProfileRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("profile store unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } | ProfileRepositoryError::Decode { message } => {
            DomainError::internal(format!("profile store error: {message}"))
        }
    }
}

#[async_trait]
impl<C, P> CatalogueQuery for OnboardingService<C, P>
where
    C: CatalogueRepository,
    P: Send + Sync,
{
    async fn universities(&self) -> Result<Vec<University>, DomainError> {
        self.catalogue
            .list_universities()
            .await
            .map_err(map_catalogue_error)
    }

    async fn careers(&self, university_id: &ReferenceId) -> Result<Vec<Career>, DomainError> {
        self.catalogue
            .list_careers(university_id)
            .await
            .map_err(map_catalogue_error)
    }
}

#[async_trait]
impl<C, P> OnboardingCommand for OnboardingService<C, P>
where
    C: CatalogueRepository,
    P: ProfileRepository,
{
    async fn complete_onboarding(
        &self,
        session: &AuthSession,
        selection: AcademicSelection,
    ) -> Result<Destination, DomainError> {
        let user_id = session
            .user_id
            .as_ref()
            .ok_or_else(|| DomainError::unauthorized("session is not bound to a user"))?;

        let career = self
            .catalogue
            .find_career(selection.career_id())
            .await
            .map_err(map_catalogue_error)?;
        match career {
            Some(career) if career.belongs_to(selection.university_id()) => {}
            Some(_) => {
                return Err(DomainError::invalid_request(
                    "career does not belong to the selected university",
                )
                .with_details(json!({
                    "universityId": selection.university_id(),
                    "careerId": selection.career_id(),
                })));
            }
            None => {
                return Err(DomainError::invalid_request("unknown career")
                    .with_details(json!({ "careerId": selection.career_id() })));
            }
        }

        self.profiles
            .save_academic_selection(user_id, &session.access_token, &selection)
            .await
            .map_err(map_profile_error)?;
        Ok(Destination::Dashboard)
    }
}
