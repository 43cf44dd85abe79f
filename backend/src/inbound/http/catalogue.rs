//! Reference data behind the onboarding form.
//!
//! ```text
//! GET /api/v1/universities
//! GET /api/v1/universities/5/careers
//! ```

use actix_web::{get, web};

use crate::domain::{Career, DomainError, ReferenceId, University};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// List universities ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/universities",
    responses(
        (status = 200, description = "Universities", body = [University]),
        (status = 503, description = "Catalogue unavailable", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["catalogue"],
    operation_id = "listUniversities",
    security([])
)]
#[get("/universities")]
pub async fn list_universities(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<University>>> {
    Ok(web::Json(state.catalogue.universities().await?))
}

/// List the careers taught at one university.
#[utoipa::path(
    get,
    path = "/api/v1/universities/{id}/careers",
    params(("id" = String, Path, description = "University identifier")),
    responses(
        (status = 200, description = "Careers", body = [Career]),
        (status = 400, description = "Invalid university id", body = DomainError),
        (status = 503, description = "Catalogue unavailable", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["catalogue"],
    operation_id = "listCareers",
    security([])
)]
#[get("/universities/{id}/careers")]
pub async fn list_careers(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Career>>> {
    let university = ReferenceId::parse(&path).ok_or_else(|| {
        DomainError::invalid_request("university id must be set")
            .with_details(serde_json::json!({ "field": "id", "value": path.as_str() }))
    })?;
    Ok(web::Json(state.catalogue.careers(&university).await?))
}
