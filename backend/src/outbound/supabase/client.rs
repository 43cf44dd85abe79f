//! Shared reqwest client for the backend-as-a-service.
//!
//! Every call carries the project's anonymous key in `apikey`. The
//! `Authorization` bearer is the user's access token when one is available so
//! row-level security sees the caller, and the anonymous key otherwise.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use zeroize::Zeroizing;

use crate::domain::SessionToken;

/// Connection settings for the backend-as-a-service.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Public project URL, e.g. `https://abcd.supabase.co`.
    pub base_url: Url,
    /// Anonymous (publishable) key.
    pub anon_key: Zeroizing<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("base_url", &self.base_url.as_str())
            .field("anon_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Pooled HTTP client bound to one project.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    anon_key: Zeroizing<String>,
}

impl SupabaseClient {
    /// Build a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: SupabaseConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: with_trailing_slash(config.base_url),
            anon_key: config.anon_key,
        })
    }

    /// Resolve `path` (no leading slash) against the project URL.
    pub(super) fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }

    /// Start a request with the project headers applied.
    pub(super) fn request(
        &self,
        method: Method,
        url: Url,
        bearer: Option<&SessionToken>,
    ) -> RequestBuilder {
        let token = bearer.map_or(self.anon_key.as_str(), SessionToken::expose);
        self.http
            .request(method, url)
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    // `Url::join` drops the last segment unless the base ends in `/`.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    //! Regression coverage for endpoint resolution.
    use super::*;
    use rstest::rstest;

    fn client(base: &str) -> SupabaseClient {
        SupabaseClient::new(SupabaseConfig {
            base_url: Url::parse(base).expect("base url"),
            anon_key: Zeroizing::new("anon".to_owned()),
            timeout: Duration::from_secs(5),
        })
        .expect("client builds")
    }

    #[rstest]
    #[case("https://abcd.supabase.co", "https://abcd.supabase.co/rest/v1/profiles")]
    #[case("https://abcd.supabase.co/", "https://abcd.supabase.co/rest/v1/profiles")]
    #[case("http://localhost:54321/proxy", "http://localhost:54321/proxy/rest/v1/profiles")]
    fn endpoints_keep_the_base_path(#[case] base: &str, #[case] expected: &str) {
        let url = client(base).endpoint("rest/v1/profiles").expect("join");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let config = SupabaseConfig {
            base_url: Url::parse("https://abcd.supabase.co").expect("base url"),
            anon_key: Zeroizing::new("super-secret".to_owned()),
            timeout: Duration::from_secs(5),
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
