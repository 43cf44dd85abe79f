//! Onboarding form submission.
//!
//! ```text
//! POST /api/v1/onboarding {"universityId":5,"careerId":2}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::{AcademicSelection, AcademicSelectionError, DomainError, ReferenceId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/onboarding`.
///
/// Identifiers are accepted as numbers or strings, matching whatever key
/// type the catalogue rows use.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    #[schema(value_type = Object, example = 5)]
    pub university_id: Option<Value>,
    #[schema(value_type = Object, example = 2)]
    pub career_id: Option<Value>,
}

impl TryFrom<OnboardingRequest> for AcademicSelection {
    type Error = AcademicSelectionError;

    fn try_from(value: OnboardingRequest) -> Result<Self, Self::Error> {
        let reference = |raw: Option<Value>| raw.as_ref().and_then(ReferenceId::from_json);
        Self::try_new(reference(value.university_id), reference(value.career_id))
    }
}

/// Where the browser should go once onboarding is saved.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    #[schema(example = "/dashboard")]
    pub redirect_to: String,
}

fn map_selection_error(err: AcademicSelectionError) -> DomainError {
    let field = match err {
        AcademicSelectionError::MissingUniversity => "universityId",
        AcademicSelectionError::MissingCareer => "careerId",
    };
    DomainError::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Save the signed-in user's university and career.
#[utoipa::path(
    post,
    path = "/api/v1/onboarding",
    request_body = OnboardingRequest,
    responses(
        (status = 200, description = "Selection saved", body = OnboardingResponse),
        (status = 400, description = "Missing or inconsistent selection", body = DomainError),
        (status = 401, description = "Login required", body = DomainError),
        (status = 503, description = "Profile store unavailable", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["onboarding"],
    operation_id = "completeOnboarding"
)]
#[post("/onboarding")]
pub async fn complete_onboarding(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OnboardingRequest>,
) -> ApiResult<web::Json<OnboardingResponse>> {
    let auth = session.require_session()?;
    let selection =
        AcademicSelection::try_from(payload.into_inner()).map_err(map_selection_error)?;
    let destination = state.onboarding.complete_onboarding(&auth, selection).await?;
    Ok(web::Json(OnboardingResponse {
        redirect_to: destination.path().to_owned(),
    }))
}
