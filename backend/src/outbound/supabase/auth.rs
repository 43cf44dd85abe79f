//! Identity provider adapter for the auth API (`/auth/v1`).

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, StatusCode};
use tracing::debug;

use super::client::SupabaseClient;
use super::dto::{AuthErrorDto, PkceGrantDto, TokenResponseDto};
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{AuthSession, CodeExchange, SessionToken};
use crate::outbound::status_message;

const TOKEN_PATH: &str = "auth/v1/token";
const LOGOUT_PATH: &str = "auth/v1/logout";

/// [`IdentityProvider`] backed by the auth API.
#[derive(Clone)]
pub struct SupabaseIdentityProvider {
    client: SupabaseClient,
}

impl SupabaseIdentityProvider {
    /// Wrap a shared project client.
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, IdentityProviderError> {
        self.client
            .endpoint(path)
            .map_err(|err| IdentityProviderError::transport(format!("invalid auth URL: {err}")))
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn exchange_code(
        &self,
        exchange: &CodeExchange,
    ) -> Result<AuthSession, IdentityProviderError> {
        let mut url = self.endpoint(TOKEN_PATH)?;
        url.query_pairs_mut().append_pair("grant_type", "pkce");
        let body = PkceGrantDto {
            auth_code: exchange.code.as_ref(),
            code_verifier: exchange.code_verifier.as_ref().map(SessionToken::expose),
        };

        let response = self
            .client
            .request(Method::POST, url, None)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        let decoded: TokenResponseDto = serde_json::from_slice(bytes.as_ref()).map_err(|err| {
            IdentityProviderError::decode(format!("invalid token response: {err}"))
        })?;
        decoded
            .into_session(Utc::now())
            .map_err(IdentityProviderError::decode)
    }

    async fn sign_out(&self, access_token: &SessionToken) -> Result<(), IdentityProviderError> {
        let url = self.endpoint(LOGOUT_PATH)?;
        let response = self
            .client
            .request(Method::POST, url, Some(access_token))
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() || is_already_revoked(status) {
            debug!(status = status.as_u16(), "session revoked");
            return Ok(());
        }
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, bytes.as_ref()))
    }
}

fn is_already_revoked(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
    )
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    if error.is_timeout() {
        IdentityProviderError::timeout(error.to_string())
    } else {
        IdentityProviderError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityProviderError {
    let message = serde_json::from_slice::<AuthErrorDto>(body)
        .ok()
        .and_then(AuthErrorDto::into_message)
        .map(|detail| format!("status {}: {detail}", status.as_u16()))
        .unwrap_or_else(|| status_message(status, body));

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            IdentityProviderError::timeout(message)
        }
        _ if status.is_client_error() => IdentityProviderError::rejected(message),
        _ => IdentityProviderError::transport(message),
    }
}
