//! Wire DTOs for the auth and data APIs.
//!
//! The data API returns snake_case rows; the adapter decodes into these
//! DTOs first, then maps into domain records in one pass.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Achievement, AuthSession, Career, Project, PublicProfile, ReferenceId, SessionToken,
    University, UserId,
};

/// Body of `POST /auth/v1/token?grant_type=pkce`.
#[derive(Debug, Serialize)]
pub(super) struct PkceGrantDto<'a> {
    pub(super) auth_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) code_verifier: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
    #[serde(default)]
    pub(super) expires_in: Option<i64>,
    #[serde(default)]
    pub(super) expires_at: Option<i64>,
    #[serde(default)]
    pub(super) user: Option<AuthUserDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthUserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) email: Option<String>,
}

/// Error body of the auth API; older deployments use `error_description`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct AuthErrorDto {
    #[serde(default)]
    pub(super) msg: Option<String>,
    #[serde(default)]
    pub(super) error_description: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl AuthErrorDto {
    pub(super) fn into_message(self) -> Option<String> {
        self.msg.or(self.error_description).or(self.message)
    }
}

impl TokenResponseDto {
    pub(super) fn into_session(self, now: DateTime<Utc>) -> Result<AuthSession, String> {
        let access_token = SessionToken::new(self.access_token)
            .map_err(|err| format!("access_token: {err}"))?;
        let user_id = self
            .user
            .as_ref()
            .map(|user| UserId::new(&user.id))
            .transpose()
            .map_err(|err| format!("user.id: {err}"))?;
        let expires_at = match (self.expires_at, self.expires_in) {
            (Some(at), _) => DateTime::from_timestamp(at, 0),
            (None, Some(seconds)) => Some(now + Duration::seconds(seconds)),
            (None, None) => None,
        };
        Ok(AuthSession {
            user_id,
            email: self.user.and_then(|user| user.email),
            access_token,
            expires_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UniversityRow {
    pub(super) id: ReferenceId,
    pub(super) name: String,
    #[serde(default)]
    pub(super) short_name: Option<String>,
}

impl From<UniversityRow> for University {
    fn from(row: UniversityRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            short_name: row.short_name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CareerRow {
    pub(super) id: ReferenceId,
    pub(super) name: String,
    pub(super) university_id: ReferenceId,
}

impl From<CareerRow> for Career {
    fn from(row: CareerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            university_id: row.university_id,
        }
    }
}

/// Embedded `universities(name)` / `careers(name)` resource.
#[derive(Debug, Deserialize)]
pub(super) struct NameRow {
    pub(super) name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileRow {
    pub(super) id: String,
    pub(super) username: String,
    #[serde(default)]
    pub(super) full_name: Option<String>,
    #[serde(default)]
    pub(super) bio: Option<String>,
    #[serde(default)]
    pub(super) avatar_url: Option<String>,
    #[serde(default)]
    pub(super) universities: Option<NameRow>,
    #[serde(default)]
    pub(super) careers: Option<NameRow>,
}

impl ProfileRow {
    pub(super) fn into_domain(self) -> Result<PublicProfile, String> {
        let id = UserId::new(&self.id).map_err(|err| format!("profile {}: {err}", self.id))?;
        Ok(PublicProfile {
            id,
            username: self.username,
            full_name: self.full_name,
            bio: self.bio,
            avatar_url: self.avatar_url,
            university: self.universities.map(|row| row.name),
            career: self.careers.map(|row| row.name),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProjectRow {
    pub(super) id: ReferenceId,
    pub(super) title: String,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) technologies: Option<Vec<String>>,
    #[serde(default)]
    pub(super) featured: Option<bool>,
    #[serde(default)]
    pub(super) repository_url: Option<String>,
    #[serde(default)]
    pub(super) demo_url: Option<String>,
    pub(super) created_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title,
            description: row.description,
            technologies: row.technologies.unwrap_or_default(),
            featured: row.featured.unwrap_or(false),
            repository_url: row.repository_url,
            demo_url: row.demo_url,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AchievementRow {
    pub(super) id: ReferenceId,
    pub(super) title: String,
    #[serde(default)]
    pub(super) issuer: Option<String>,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) category: Option<String>,
    #[serde(default)]
    pub(super) achieved_on: Option<NaiveDate>,
}

impl From<AchievementRow> for Achievement {
    fn from(row: AchievementRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title,
            issuer: row.issuer,
            description: row.description,
            category: row.category,
            achieved_on: row.achieved_on,
        }
    }
}

/// Body of the onboarding `PATCH`.
#[derive(Debug, Serialize)]
pub(super) struct AcademicSelectionPatch<'a> {
    pub(super) university_id: &'a ReferenceId,
    pub(super) career_id: &'a ReferenceId,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for DTO mapping.
    use super::*;
    use serde_json::json;

    const USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[test]
    fn token_response_maps_to_a_session() {
        let dto: TokenResponseDto = serde_json::from_value(json!({
            "access_token": "jwt",
            "refresh_token": "refresh",
            "expires_in": 3600,
            "expires_at": 1_900_000_000,
            "token_type": "bearer",
            "user": {"id": USER, "email": "ana@example.com"}
        }))
        .expect("decode");

        let session = dto.into_session(Utc::now()).expect("session");
        assert_eq!(session.access_token.expose(), "jwt");
        assert_eq!(session.user_id.map(String::from).as_deref(), Some(USER));
        assert_eq!(session.email.as_deref(), Some("ana@example.com"));
        assert_eq!(
            session.expires_at.map(|at| at.timestamp()),
            Some(1_900_000_000)
        );
    }

    #[test]
    fn refresh_tokens_are_not_kept_in_the_session() {
        let dto: TokenResponseDto = serde_json::from_value(json!({
            "access_token": "jwt",
            "refresh_token": "refresh-secret",
            "user": {"id": USER}
        }))
        .expect("decode");

        let session = dto.into_session(Utc::now()).expect("session");
        let stored = serde_json::to_string(&session).expect("serialise");
        assert!(!stored.contains("refresh-secret"));
    }

    #[test]
    fn expiry_falls_back_to_expires_in() {
        let now = Utc::now();
        let dto: TokenResponseDto =
            serde_json::from_value(json!({"access_token": "jwt", "expires_in": 60}))
                .expect("decode");
        let session = dto.into_session(now).expect("session");
        assert_eq!(session.expires_at, Some(now + Duration::seconds(60)));
        assert!(session.user_id.is_none());
    }

    #[test]
    fn blank_access_token_is_a_decode_failure() {
        let dto: TokenResponseDto =
            serde_json::from_value(json!({"access_token": " "})).expect("decode");
        assert!(dto.into_session(Utc::now()).is_err());
    }

    #[test]
    fn auth_error_prefers_msg() {
        let dto: AuthErrorDto = serde_json::from_value(
            json!({"error_description": "old", "msg": "invalid flow state"}),
        )
        .expect("decode");
        assert_eq!(dto.into_message().as_deref(), Some("invalid flow state"));
    }

    #[test]
    fn profile_rows_flatten_embedded_names() {
        let row: ProfileRow = serde_json::from_value(json!({
            "id": USER,
            "username": "ana.lopez",
            "full_name": "Ana López",
            "universities": {"name": "UBA"},
            "careers": null
        }))
        .expect("decode");
        let profile = row.into_domain().expect("profile");
        assert_eq!(profile.university.as_deref(), Some("UBA"));
        assert!(profile.career.is_none());
    }

    #[test]
    fn project_rows_default_missing_collections() {
        let row: ProjectRow = serde_json::from_value(json!({
            "id": 7,
            "title": "Compiler",
            "technologies": null,
            "created_at": "2024-05-01T10:00:00Z"
        }))
        .expect("decode");
        let project = Project::from(row);
        assert_eq!(project.id, "7");
        assert!(project.technologies.is_empty());
        assert!(!project.featured);
    }

    #[test]
    fn selection_patch_keeps_reference_types() {
        let university = ReferenceId::Numeric(5);
        let career = ReferenceId::Text("a7c1".to_owned());
        let body = serde_json::to_value(AcademicSelectionPatch {
            university_id: &university,
            career_id: &career,
        })
        .expect("encode");
        assert_eq!(body, json!({"university_id": 5, "career_id": "a7c1"}));
    }
}
