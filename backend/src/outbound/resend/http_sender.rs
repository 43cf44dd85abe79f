//! Reqwest-backed mail sender for a Resend-compatible API.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping. The provider's acknowledgement is passed through
//! untouched.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::OutboundEmail;
use crate::domain::ports::{MailReceipt, MailSender, MailSenderError};
use crate::outbound::status_message;

/// Connection settings for the mail API.
#[derive(Clone)]
pub struct ResendConfig {
    /// API base URL, e.g. `https://api.resend.com`.
    pub base_url: Url,
    /// Secret API key.
    pub api_key: Zeroizing<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Mail sender that POSTs to `{base_url}/emails`.
pub struct ResendMailSender {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl ResendMailSender {
    /// Build a sender using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: ResendConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: emails_endpoint(config.base_url),
            api_key: config.api_key,
        })
    }
}

fn emails_endpoint(mut base: Url) -> Url {
    let path = format!("{}/emails", base.path().trim_end_matches('/'));
    base.set_path(&path);
    base
}

#[derive(Debug, Serialize)]
struct SendEmailDto<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

impl<'a> From<&'a OutboundEmail> for SendEmailDto<'a> {
    fn from(email: &'a OutboundEmail) -> Self {
        Self {
            from: &email.from,
            to: email.to.iter().map(String::as_str).collect(),
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
            reply_to: email.reply_to.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDto {
    message: String,
}

#[async_trait]
impl MailSender for ResendMailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<MailReceipt, MailSenderError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&SendEmailDto::from(email))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(decode_receipt(body.as_ref()))
    }
}

/// Provider acknowledgement for an accepted message; a body that is not JSON
/// becomes `null`.
fn decode_receipt(body: &[u8]) -> MailReceipt {
    match serde_json::from_slice(body) {
        Ok(receipt) => MailReceipt(receipt),
        Err(err) => {
            warn!(
                error = %err,
                body_len = body.len(),
                "mail provider receipt was not JSON; relaying null"
            );
            MailReceipt(Value::Null)
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> MailSenderError {
    if error.is_timeout() {
        MailSenderError::timeout(error.to_string())
    } else {
        MailSenderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MailSenderError {
    // Callers see this message, so prefer the provider's own wording.
    let message = serde_json::from_slice::<ProviderErrorDto>(body)
        .map(|dto| dto.message)
        .unwrap_or_else(|_| status_message(status, body));

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            MailSenderError::timeout(message)
        }
        _ if status.is_client_error() => MailSenderError::rejected(message),
        _ => MailSenderError::transport(message),
    }
}
