//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they only depend on domain
//! ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::Deployment;
use crate::domain::ports::{
    CatalogueQuery, ContactRelay, OnboardingCommand, PortfolioQuery, SignInCallback,
    SignOutCommand,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub sign_in: Arc<dyn SignInCallback>,
    pub sign_out: Arc<dyn SignOutCommand>,
    pub contact: Arc<dyn ContactRelay>,
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub onboarding: Arc<dyn OnboardingCommand>,
    pub portfolio: Arc<dyn PortfolioQuery>,
}

/// Settings the auth callback needs besides its ports.
#[derive(Debug, Clone)]
pub struct CallbackSettings {
    /// Development deployments ignore `X-Forwarded-Host`.
    pub deployment: Deployment,
    /// Cookie holding the PKCE code verifier set by the browser client.
    pub code_verifier_cookie: String,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sign_in: Arc<dyn SignInCallback>,
    pub sign_out: Arc<dyn SignOutCommand>,
    pub contact: Arc<dyn ContactRelay>,
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub onboarding: Arc<dyn OnboardingCommand>,
    pub portfolio: Arc<dyn PortfolioQuery>,
    pub callback: CallbackSettings,
}

impl HttpState {
    /// Construct state from the ports bundle and callback settings.
    pub fn new(ports: HttpStatePorts, callback: CallbackSettings) -> Self {
        let HttpStatePorts {
            sign_in,
            sign_out,
            contact,
            catalogue,
            onboarding,
            portfolio,
        } = ports;
        Self {
            sign_in,
            sign_out,
            contact,
            catalogue,
            onboarding,
            portfolio,
            callback,
        }
    }
}
