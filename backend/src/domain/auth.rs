//! Authentication primitives: authorization codes and identity sessions.
//!
//! Keep inbound query parsing outside the domain by exposing constructors
//! that validate raw strings before a handler talks to a port or service.
//! Token values are opaque; they are stored and forwarded, never inspected.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::UserId;

/// Domain error returned when sign-in inputs are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// The callback carried no authorization code.
    MissingCode,
    /// A token value was blank.
    EmptyToken,
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCode => write!(f, "authorization code is required"),
            Self::EmptyToken => write!(f, "session token must not be empty"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

/// One-time authorization code delivered to the callback endpoint.
///
/// ## Invariants
/// - Trimmed and non-empty.
///
/// # Examples
/// ```
/// use prisma_backend::domain::AuthCode;
///
/// assert!(AuthCode::from_query(None).is_err());
/// assert!(AuthCode::from_query(Some("  ")).is_err());
/// assert_eq!(AuthCode::from_query(Some("abc123")).unwrap().as_ref(), "abc123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthCode(Zeroizing<String>);

impl AuthCode {
    /// Build a code from an optional query parameter.
    pub fn from_query(raw: Option<&str>) -> Result<Self, AuthValidationError> {
        match raw.map(str::trim) {
            Some(code) if !code.is_empty() => Ok(Self(Zeroizing::new(code.to_owned()))),
            _ => Err(AuthValidationError::MissingCode),
        }
    }
}

impl AsRef<str> for AuthCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthCode(<redacted>)")
    }
}

/// Opaque bearer token issued by the identity provider.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Validate and wrap a token value.
    pub fn new(raw: impl Into<String>) -> Result<Self, AuthValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AuthValidationError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(raw)))
    }

    /// Borrow the raw token for outbound headers.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0.as_str().to_owned()
    }
}

impl TryFrom<String> for SessionToken {
    type Error = AuthValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authorization code plus the PKCE verifier the browser kept for it.
#[derive(Debug, Clone)]
pub struct CodeExchange {
    /// Code received on the callback.
    pub code: AuthCode,
    /// PKCE verifier, when the sign-in flow used one.
    pub code_verifier: Option<SessionToken>,
}

/// Session issued by the identity provider after a successful exchange.
///
/// The service keeps it in the encrypted session cookie so later requests
/// can act on the user's behalf and sign-out can revoke it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// User the session belongs to, when the provider reported one.
    pub user_id: Option<UserId>,
    /// Email of the signed-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Bearer token for data API calls.
    pub access_token: SessionToken,
    /// Access token expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthSession {
    /// Whether the access token has already expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}
