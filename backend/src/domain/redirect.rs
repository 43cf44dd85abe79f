//! Post-sign-in redirect decision.
//!
//! The callback ends in exactly one redirect. [`Destination`] captures where
//! it goes; [`RedirectBase`] turns that into an absolute URL using the
//! request origin or, behind a reverse proxy, the forwarded host.

use url::Url;

use super::ProfileCompleteness;

/// Landing page for users with a complete profile.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Form that collects the missing academic details.
pub const ONBOARDING_PATH: &str = "/onboarding";
/// Login page flagged with the failed-exchange error.
pub const AUTH_ERROR_PATH: &str = "/login?error=auth-code-error";
/// Site root, the default `next` value and the sign-out target.
pub const SITE_ROOT: &str = "/";

/// Same-site path supplied by the caller through the `next` parameter.
///
/// ## Invariants
/// - Starts with a single `/` and contains no backslashes or control
///   characters; any other input collapses to `/`.
///
/// # Examples
/// ```
/// use prisma_backend::domain::NextPath;
///
/// assert_eq!(NextPath::sanitise(None).as_str(), "/");
/// assert_eq!(NextPath::sanitise(Some("/projects?tab=2")).as_str(), "/projects?tab=2");
/// assert_eq!(NextPath::sanitise(Some("//evil.example")).as_str(), "/");
/// assert_eq!(NextPath::sanitise(Some("https://evil.example")).as_str(), "/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextPath(String);

impl NextPath {
    /// Accept `raw` when it is a safe same-site path, else fall back to `/`.
    pub fn sanitise(raw: Option<&str>) -> Self {
        match raw {
            Some(path) if is_same_site_path(path) => Self(path.to_owned()),
            _ => Self::default(),
        }
    }

    /// Path and query to redirect to.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for NextPath {
    fn default() -> Self {
        Self(SITE_ROOT.to_owned())
    }
}

fn is_same_site_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}

/// Terminal redirect target of the sign-in callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Profile complete.
    Dashboard,
    /// Profile missing a university or career.
    Onboarding,
    /// No user or profile could be resolved; honour the caller's `next`.
    Next(NextPath),
    /// The code was missing or the exchange failed.
    AuthError,
}

impl Destination {
    /// Decide between dashboard and onboarding from a fetched profile row.
    ///
    /// A user without a profile row is treated as not yet onboarded.
    ///
    /// # Examples
    /// ```
    /// use prisma_backend::domain::{Destination, ProfileCompleteness, ReferenceId};
    ///
    /// let complete = ProfileCompleteness {
    ///     university_id: Some(ReferenceId::Numeric(5)),
    ///     career_id: Some(ReferenceId::Numeric(2)),
    /// };
    /// assert_eq!(Destination::for_profile(Some(&complete)), Destination::Dashboard);
    /// assert_eq!(Destination::for_profile(None), Destination::Onboarding);
    /// ```
    pub fn for_profile(profile: Option<&ProfileCompleteness>) -> Self {
        if profile.is_some_and(ProfileCompleteness::is_complete) {
            Self::Dashboard
        } else {
            Self::Onboarding
        }
    }

    /// Site-relative path of the target.
    pub fn path(&self) -> &str {
        match self {
            Self::Dashboard => DASHBOARD_PATH,
            Self::Onboarding => ONBOARDING_PATH,
            Self::Next(next) => next.as_str(),
            Self::AuthError => AUTH_ERROR_PATH,
        }
    }
}

/// Deployment flavour; only development ignores forwarded hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    /// Local development server reached directly.
    Development,
    /// Any deployment that may sit behind a reverse proxy.
    Production,
}

/// Absolute origin that redirect paths are appended to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectBase(String);

impl RedirectBase {
    /// Choose the origin for redirects.
    ///
    /// Outside development a valid `X-Forwarded-Host` wins and is served over
    /// HTTPS; otherwise the request's own origin is used.
    ///
    /// # Examples
    /// ```
    /// use prisma_backend::domain::{Deployment, Destination, RedirectBase};
    /// use url::Url;
    ///
    /// let origin = Url::parse("http://10.0.0.7:8080").unwrap();
    /// let base = RedirectBase::resolve(&origin, Some("prisma.app"), Deployment::Production);
    /// assert_eq!(base.url_for(&Destination::Dashboard), "https://prisma.app/dashboard");
    ///
    /// let base = RedirectBase::resolve(&origin, Some("prisma.app"), Deployment::Development);
    /// assert_eq!(base.url_for(&Destination::Dashboard), "http://10.0.0.7:8080/dashboard");
    /// ```
    pub fn resolve(origin: &Url, forwarded_host: Option<&str>, deployment: Deployment) -> Self {
        let forwarded = match deployment {
            Deployment::Development => None,
            Deployment::Production => forwarded_host.and_then(forwarded_origin),
        };
        Self(forwarded.unwrap_or_else(|| origin.origin().ascii_serialization()))
    }

    /// Base yielding site-relative locations.
    pub fn relative() -> Self {
        Self(String::new())
    }

    /// Absolute URL for `destination`.
    pub fn url_for(&self, destination: &Destination) -> String {
        self.url_for_path(destination.path())
    }

    /// Absolute URL for an already validated site-relative path.
    pub fn url_for_path(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

fn forwarded_origin(header: &str) -> Option<String> {
    // Chained proxies append hosts; the first one is what the client used.
    let host = header.split(',').next()?.trim();
    if host.is_empty() || host.contains(['/', '\\', '@', '?', '#']) {
        return None;
    }
    let url = Url::parse(&format!("https://{host}")).ok()?;
    url.host_str()?;
    Some(url.origin().ascii_serialization())
}
