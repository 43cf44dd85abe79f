//! Contact-form relay endpoint.
//!
//! ```text
//! POST /api/send {"name":"Ana","email":"a@x.com","message":"hi","toEmail":"b@x.com"}
//! ```
//!
//! Unlike the versioned API this endpoint answers with the flat
//! `{"error": ...}` / `{"success": true, "data": ...}` shapes the portfolio
//! front end expects.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::{ContactDraft, ContactMessage};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/send`. Every field is optional on the wire so
/// absent and blank values get the same answer.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[schema(example = "Ana")]
    pub name: Option<String>,
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    #[schema(example = "hi")]
    pub message: Option<String>,
    #[schema(example = "b@x.com")]
    pub to_email: Option<String>,
    #[schema(example = "Bruno")]
    pub to_name: Option<String>,
}

impl ContactRequest {
    fn draft(&self) -> ContactDraft<'_> {
        ContactDraft {
            name: self.name.as_deref(),
            email: self.email.as_deref(),
            message: self.message.as_deref(),
            to_email: self.to_email.as_deref(),
            to_name: self.to_name.as_deref(),
        }
    }
}

/// Flat error body of the relay endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct RelayError {
    #[schema(example = "Missing required fields")]
    pub error: String,
}

fn relay_error(mut response: actix_web::HttpResponseBuilder, message: &str) -> HttpResponse {
    response.json(RelayError {
        error: message.to_owned(),
    })
}

/// Relay a visitor's message to a portfolio owner's inbox.
#[utoipa::path(
    post,
    path = "/api/send",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message accepted by the mail provider"),
        (status = 400, description = "Missing fields or malformed body", body = RelayError),
        (status = 500, description = "Delivery failed", body = RelayError)
    ),
    tags = ["contact"],
    operation_id = "sendContactMessage",
    security([])
)]
#[post("/api/send")]
pub async fn send(
    state: web::Data<HttpState>,
    payload: Result<web::Json<ContactRequest>, actix_web::Error>,
) -> HttpResponse {
    let Ok(payload) = payload else {
        return relay_error(HttpResponse::BadRequest(), "Missing required fields");
    };
    let message = match ContactMessage::try_from_draft(payload.draft()) {
        Ok(message) => message,
        Err(err) => {
            info!(error = %err, "contact message rejected");
            return relay_error(HttpResponse::BadRequest(), &err.to_string());
        }
    };

    match state.contact.relay(&message).await {
        Ok(receipt) => HttpResponse::Ok().json(json!({ "success": true, "data": receipt.0 })),
        Err(err) => {
            warn!(code = ?err.code(), message = %err.message(), "contact relay failed");
            relay_error(HttpResponse::InternalServerError(), err.message())
        }
    }
}
