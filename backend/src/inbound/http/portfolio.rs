//! Portfolio read endpoints.
//!
//! ```text
//! GET /api/v1/dashboard
//! GET /api/v1/profiles/ana.lopez
//! ```

use actix_web::{HttpResponse, get, web};

use crate::domain::{DomainError, Portfolio, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const PRIVATE_NO_CACHE: (&str, &str) = ("Cache-Control", "private, no-cache, must-revalidate");

/// Portfolio of the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Signed-in user's portfolio", body = Portfolio),
        (status = 401, description = "Login required", body = DomainError),
        (status = 404, description = "No profile for this user", body = DomainError),
        (status = 503, description = "Profile store unavailable", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["portfolio"],
    operation_id = "getDashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let auth = session.require_session()?;
    let portfolio = state.portfolio.dashboard(&auth).await?;
    Ok(HttpResponse::Ok()
        .insert_header(PRIVATE_NO_CACHE)
        .json(portfolio))
}

/// Public portfolio by username.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{username}",
    params(("username" = String, Path, description = "Public handle")),
    responses(
        (status = 200, description = "Public portfolio", body = Portfolio),
        (status = 404, description = "No such profile", body = DomainError),
        (status = 503, description = "Profile store unavailable", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["portfolio"],
    operation_id = "getPublicPortfolio",
    security([])
)]
#[get("/profiles/{username}")]
pub async fn public_portfolio(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Portfolio>> {
    let raw = path.into_inner();
    // A handle that cannot exist is reported like any unknown one.
    let username = Username::new(raw.as_str())
        .map_err(|_| DomainError::not_found(format!("no profile named {raw}")))?;
    Ok(web::Json(state.portfolio.public_portfolio(&username).await?))
}
