//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep [`DomainError`] HTTP-agnostic while letting handlers return
//! it directly. Internal failures are redacted before they reach clients; the
//! trace identifier is echoed in the `trace-id` header and the payload.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{DomainError, ErrorCode, TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, DomainError>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Payload actually sent to the client.
///
/// Internal errors lose their message and details; every error gains the
/// ambient trace id when it was built outside a traced scope.
fn client_payload(error: &DomainError) -> DomainError {
    let payload = if error.code() == ErrorCode::InternalError {
        error!(message = error.message(), "internal error returned to client");
        DomainError::internal(REDACTED_MESSAGE)
    } else {
        error.clone()
    };
    match error
        .trace_id()
        .map(str::to_owned)
        .or_else(|| TraceId::current().map(|id| id.to_string()))
    {
        Some(id) => payload.with_trace_id(id),
        None => payload,
    }
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let payload = client_payload(self);
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = payload.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(payload)
    }
}

impl From<actix_web::Error> for DomainError {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(REDACTED_MESSAGE)
    }
}

/// Turn JSON extractor failures into `400 invalid_request` envelopes.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "rejected JSON payload");
    DomainError::invalid_request(format!("invalid JSON payload: {err}")).into()
}

/// Fallback for unmatched routes.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(DomainError::not_found(format!(
        "no route for {} {}",
        req.method(),
        req.path()
    )))
}

#[cfg(test)]
mod tests;
