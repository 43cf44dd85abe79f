//! Sign-in callback and sign-out handlers.
//!
//! ```text
//! GET  /auth/callback?code=abc123&next=/projects
//! POST /auth/signout
//! ```
//!
//! Both endpoints always answer with a single `302 Found`.

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::{error, info, warn};
use url::Url;
use utoipa::IntoParams;

use crate::domain::{
    AuthCode, CodeExchange, Destination, NextPath, RedirectBase, SITE_ROOT, SessionToken,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const FORWARDED_HOST: &str = "x-forwarded-host";

/// Query string of the authorization-code callback.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CallbackQuery {
    /// Authorization code issued by the identity provider.
    pub code: Option<String>,
    /// Same-site path to land on when the profile cannot be resolved.
    pub next: Option<String>,
}

/// Origin the request was addressed to: listener scheme plus `Host`.
fn request_origin(req: &HttpRequest) -> Option<Url> {
    let config = req.app_config();
    let scheme = if config.secure() { "https" } else { "http" };
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_else(|| config.host());
    Url::parse(&format!("{scheme}://{host}")).ok()
}

fn redirect_base(req: &HttpRequest, state: &HttpState) -> RedirectBase {
    let forwarded = req
        .headers()
        .get(FORWARDED_HOST)
        .and_then(|value| value.to_str().ok());
    match request_origin(req) {
        Some(origin) => RedirectBase::resolve(&origin, forwarded, state.callback.deployment),
        None => {
            warn!("unusable Host header; redirecting with a relative location");
            RedirectBase::relative()
        }
    }
}

fn found(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// PKCE verifier stored by the browser client, if the flow used one.
fn code_verifier(req: &HttpRequest, cookie_name: &str) -> Option<SessionToken> {
    let cookie = req.cookie(cookie_name)?;
    let raw = cookie.value().trim_matches('"');
    SessionToken::new(raw).ok()
}

/// Finish sign-in: exchange the code, store the session and redirect.
///
/// Targets `/dashboard` for complete profiles, `/onboarding` otherwise,
/// `next` when the profile cannot be resolved and
/// `/login?error=auth-code-error` when the code is missing or rejected.
#[utoipa::path(
    get,
    path = "/auth/callback",
    params(CallbackQuery),
    responses(
        (status = 302, description = "Redirect to the computed destination",
            headers(("Location" = String, description = "Absolute redirect target")))
    ),
    tags = ["auth"],
    operation_id = "authCallback",
    security([])
)]
#[get("/callback")]
pub async fn callback(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
    query: Result<web::Query<CallbackQuery>, actix_web::Error>,
) -> HttpResponse {
    let base = redirect_base(&req, &state);
    let CallbackQuery { code, next } = query.map(web::Query::into_inner).unwrap_or_default();

    let Ok(code) = AuthCode::from_query(code.as_deref()) else {
        info!("callback without authorization code");
        return found(base.url_for(&Destination::AuthError));
    };
    let exchange = CodeExchange {
        code,
        code_verifier: code_verifier(&req, &state.callback.code_verifier_cookie),
    };

    let outcome = state
        .sign_in
        .complete_sign_in(exchange, NextPath::sanitise(next.as_deref()))
        .await;
    let Some(auth_session) = outcome.session else {
        return found(base.url_for(&outcome.destination));
    };
    if let Err(err) = session.persist_session(&auth_session) {
        error!(error = %err, "could not store session after sign-in");
        return found(base.url_for(&Destination::AuthError));
    }

    let mut response = found(base.url_for(&outcome.destination));
    let mut spent = Cookie::build(state.callback.code_verifier_cookie.clone(), "")
        .path("/")
        .finish();
    spent.make_removal();
    if let Err(err) = response.add_removal_cookie(&spent) {
        error!(error = %err, "could not clear code verifier cookie");
    }
    response
}

/// Sign out: revoke the session upstream, clear the cookie, go home.
#[utoipa::path(
    post,
    path = "/auth/signout",
    responses(
        (status = 302, description = "Redirect to the site root",
            headers(("Location" = String, description = "Absolute URL of the site root")))
    ),
    tags = ["auth"],
    operation_id = "signOut",
    security([])
)]
#[post("/signout")]
pub async fn signout(
    req: HttpRequest,
    state: web::Data<HttpState>,
    session: SessionContext,
) -> HttpResponse {
    state.sign_out.sign_out(session.session()).await;
    session.purge();
    found(redirect_base(&req, &state).url_for_path(SITE_ROOT))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
