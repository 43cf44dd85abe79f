//! In-memory doubles for the driven ports.
//!
//! The doubles sit behind the real domain services so the integration tests
//! exercise the whole request path apart from network I/O.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;

use prisma_backend::domain::ports::{
    CatalogueRepository, CatalogueRepositoryError, IdentityProvider, IdentityProviderError,
    MailReceipt, MailSender, MailSenderError, PortfolioRepository, PortfolioRepositoryError,
    ProfileRepository, ProfileRepositoryError,
};
use prisma_backend::domain::{
    AcademicSelection, Achievement, AuthSession, Career, CodeExchange, OutboundEmail,
    ProfileCompleteness, Project, PublicProfile, ReferenceId, SessionToken, University, UserId,
    Username,
};

/// Code the identity double accepts for the onboarded student.
pub const ONBOARDED_CODE: &str = "code-onboarded";
/// Code the identity double accepts for a student without a career.
pub const FRESH_CODE: &str = "code-fresh";

pub const ONBOARDED_USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
pub const FRESH_USER: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

fn user(raw: &str) -> UserId {
    UserId::new(raw).expect("fixture user id")
}

fn token(raw: &str) -> SessionToken {
    SessionToken::new(raw).expect("fixture token")
}

/// Identity provider issuing one fixed session per known code.
#[derive(Clone, Default)]
pub struct StubIdentity {
    revoked: Arc<Mutex<Vec<String>>>,
}

impl StubIdentity {
    pub fn revoked(&self) -> Vec<String> {
        self.revoked.lock().expect("revoked lock").clone()
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn exchange_code(
        &self,
        exchange: &CodeExchange,
    ) -> Result<AuthSession, IdentityProviderError> {
        let (user_id, access) = match exchange.code.as_ref() {
            ONBOARDED_CODE => (ONBOARDED_USER, "token-onboarded"),
            FRESH_CODE => (FRESH_USER, "token-fresh"),
            _ => return Err(IdentityProviderError::rejected("invalid flow state")),
        };
        Ok(AuthSession {
            user_id: Some(user(user_id)),
            email: Some("ana@example.com".to_owned()),
            access_token: token(access),
            expires_at: None,
        })
    }

    async fn sign_out(&self, access_token: &SessionToken) -> Result<(), IdentityProviderError> {
        self.revoked
            .lock()
            .expect("revoked lock")
            .push(access_token.expose().to_owned());
        Ok(())
    }
}

/// Profile, catalogue and portfolio rows held in memory.
#[derive(Clone)]
pub struct MemoryStore {
    selections: Arc<Mutex<HashMap<String, ProfileCompleteness>>>,
    universities: Vec<University>,
    careers: Vec<Career>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        let mut selections = HashMap::new();
        selections.insert(
            ONBOARDED_USER.to_owned(),
            ProfileCompleteness {
                university_id: Some(ReferenceId::Numeric(1)),
                career_id: Some(ReferenceId::Numeric(10)),
            },
        );
        selections.insert(FRESH_USER.to_owned(), ProfileCompleteness::default());
        Self {
            selections: Arc::new(Mutex::new(selections)),
            universities: vec![
                University {
                    id: ReferenceId::Numeric(1),
                    name: "Universidad de Buenos Aires".to_owned(),
                    short_name: Some("UBA".to_owned()),
                },
                University {
                    id: ReferenceId::Numeric(2),
                    name: "Universidad de Chile".to_owned(),
                    short_name: None,
                },
            ],
            careers: vec![
                Career {
                    id: ReferenceId::Numeric(10),
                    name: "Ingeniería Informática".to_owned(),
                    university_id: ReferenceId::Numeric(1),
                },
                Career {
                    id: ReferenceId::Numeric(20),
                    name: "Medicina".to_owned(),
                    university_id: ReferenceId::Numeric(2),
                },
            ],
        }
    }
}

impl MemoryStore {
    pub fn selection_of(&self, user_id: &str) -> Option<ProfileCompleteness> {
        self.selections
            .lock()
            .expect("selections lock")
            .get(user_id)
            .cloned()
    }

    fn profile(&self, id: &UserId) -> Option<PublicProfile> {
        (id.to_string() == ONBOARDED_USER).then(|| PublicProfile {
            id: id.clone(),
            username: "ana.lopez".to_owned(),
            full_name: Some("Ana López".to_owned()),
            bio: None,
            avatar_url: None,
            university: Some("Universidad de Buenos Aires".to_owned()),
            career: Some("Ingeniería Informática".to_owned()),
        })
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn fetch_completeness(
        &self,
        user_id: &UserId,
        _access_token: &SessionToken,
    ) -> Result<Option<ProfileCompleteness>, ProfileRepositoryError> {
        Ok(self.selection_of(&user_id.to_string()))
    }

    async fn save_academic_selection(
        &self,
        user_id: &UserId,
        _access_token: &SessionToken,
        selection: &AcademicSelection,
    ) -> Result<(), ProfileRepositoryError> {
        self.selections.lock().expect("selections lock").insert(
            user_id.to_string(),
            ProfileCompleteness {
                university_id: Some(selection.university_id().clone()),
                career_id: Some(selection.career_id().clone()),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl CatalogueRepository for MemoryStore {
    async fn list_universities(&self) -> Result<Vec<University>, CatalogueRepositoryError> {
        Ok(self.universities.clone())
    }

    async fn list_careers(
        &self,
        university_id: &ReferenceId,
    ) -> Result<Vec<Career>, CatalogueRepositoryError> {
        Ok(self
            .careers
            .iter()
            .filter(|career| career.belongs_to(university_id))
            .cloned()
            .collect())
    }

    async fn find_career(
        &self,
        career_id: &ReferenceId,
    ) -> Result<Option<Career>, CatalogueRepositoryError> {
        Ok(self.careers.iter().find(|career| &career.id == career_id).cloned())
    }
}

#[async_trait]
impl PortfolioRepository for MemoryStore {
    async fn find_profile_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<PublicProfile>, PortfolioRepositoryError> {
        Ok(self
            .profile(&user(ONBOARDED_USER))
            .filter(|profile| profile.username == username.as_ref()))
    }

    async fn find_profile_by_id(
        &self,
        user_id: &UserId,
        _access_token: Option<SessionToken>,
    ) -> Result<Option<PublicProfile>, PortfolioRepositoryError> {
        Ok(self.profile(user_id))
    }

    async fn list_projects(
        &self,
        _user_id: &UserId,
        _access_token: Option<SessionToken>,
    ) -> Result<Vec<Project>, PortfolioRepositoryError> {
        Ok(vec![Project {
            id: "1".to_owned(),
            title: "Compiler".to_owned(),
            description: None,
            technologies: vec!["Rust".to_owned()],
            featured: true,
            repository_url: None,
            demo_url: None,
            created_at: Utc
                .with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
                .single()
                .expect("valid date"),
        }])
    }

    async fn list_achievements(
        &self,
        _user_id: &UserId,
        _access_token: Option<SessionToken>,
    ) -> Result<Vec<Achievement>, PortfolioRepositoryError> {
        Ok(Vec::new())
    }
}

/// Mail sender recording every delivered message.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<MailReceipt, MailSenderError> {
        self.sent.lock().expect("sent lock").push(email.clone());
        Ok(MailReceipt(json!({ "id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794" })))
    }
}
