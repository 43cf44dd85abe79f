//! Application settings loaded via OrthoConfig.
//!
//! Values come from `PRISMA_*` environment variables, configuration files and
//! command-line flags. Accessors apply defaults and validate the values the
//! outbound adapters need, so a misconfigured deployment fails at start-up.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::Deployment;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_RESEND_URL: &str = "https://api.resend.com";
const DEFAULT_MAIL_FROM: &str = "Prisma <onboarding@resend.dev>";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const CODE_VERIFIER_SUFFIX: &str = "-auth-token-code-verifier";

/// Errors raised when a setting is missing or malformed.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A required setting was not provided.
    #[error("missing required setting {name}")]
    Missing { name: &'static str },
    /// A URL setting could not be parsed.
    #[error("invalid URL in {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
    /// The bind address could not be parsed.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Settings for the HTTP server and its collaborators.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PRISMA")]
pub struct AppSettings {
    /// Public URL of the identity and data service.
    pub supabase_url: Option<String>,
    /// Anonymous (publishable) key of the identity and data service.
    pub supabase_anon_key: Option<String>,
    /// Secret key of the email-delivery API.
    pub resend_api_key: Option<String>,
    /// Sender mailbox for relayed contact messages.
    pub mail_from: Option<String>,
    /// Base URL of the email-delivery API.
    pub resend_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Development deployments ignore `X-Forwarded-Host`.
    #[ortho_config(default = false)]
    pub development: bool,
    /// Timeout applied to every outbound request, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Name of the cookie holding the PKCE code verifier.
    pub code_verifier_cookie: Option<String>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| "<redacted>");
        f.debug_struct("AppSettings")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &redact(&self.supabase_anon_key))
            .field("resend_api_key", &redact(&self.resend_api_key))
            .field("mail_from", &self.mail_from)
            .field("resend_url", &self.resend_url)
            .field("bind_addr", &self.bind_addr)
            .field("development", &self.development)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("code_verifier_cookie", &self.code_verifier_cookie)
            .finish()
    }
}

fn required<'a>(value: Option<&'a String>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(|raw| raw.trim())
        .filter(|raw| !raw.is_empty())
        .ok_or(SettingsError::Missing { name })
}

fn parse_url(raw: &str, name: &'static str) -> Result<Url, SettingsError> {
    Url::parse(raw).map_err(|source| SettingsError::InvalidUrl { name, source })
}

impl AppSettings {
    /// Base URL of the identity and data service.
    pub fn supabase_url(&self) -> Result<Url, SettingsError> {
        let raw = required(self.supabase_url.as_ref(), "PRISMA_SUPABASE_URL")?;
        parse_url(raw, "PRISMA_SUPABASE_URL")
    }

    /// Anonymous key sent as `apikey` on every call.
    pub fn supabase_anon_key(&self) -> Result<Zeroizing<String>, SettingsError> {
        required(self.supabase_anon_key.as_ref(), "PRISMA_SUPABASE_ANON_KEY")
            .map(|key| Zeroizing::new(key.to_owned()))
    }

    /// Secret key of the email-delivery API.
    pub fn resend_api_key(&self) -> Result<Zeroizing<String>, SettingsError> {
        required(self.resend_api_key.as_ref(), "PRISMA_RESEND_API_KEY")
            .map(|key| Zeroizing::new(key.to_owned()))
    }

    /// Base URL of the email-delivery API.
    pub fn resend_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            self.resend_url.as_deref().unwrap_or(DEFAULT_RESEND_URL),
            "PRISMA_RESEND_URL",
        )
    }

    /// Sender mailbox, falling back to the provider's shared test sender.
    pub fn mail_from(&self) -> &str {
        self.mail_from.as_deref().unwrap_or(DEFAULT_MAIL_FROM)
    }

    /// Address the server listens on.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Whether this is a development deployment.
    pub fn deployment(&self) -> Deployment {
        if self.development {
            Deployment::Development
        } else {
            Deployment::Production
        }
    }

    /// Timeout for outbound requests.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Cookie name holding the PKCE verifier.
    ///
    /// Defaults to the name the browser client derives from the project
    /// reference, i.e. the first label of the service host.
    pub fn code_verifier_cookie(&self) -> Result<String, SettingsError> {
        if let Some(name) = self.code_verifier_cookie.as_deref() {
            return Ok(name.to_owned());
        }
        let url = self.supabase_url()?;
        let project_ref = url
            .host_str()
            .and_then(|host| host.split('.').next())
            .unwrap_or("localhost");
        Ok(format!("sb-{project_ref}{CODE_VERIFIER_SUFFIX}"))
    }
}
