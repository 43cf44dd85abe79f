//! Wire outbound adapters into domain services and HTTP state.

use std::io;
use std::sync::Arc;

use prisma_backend::domain::{
    AuthCallbackService, ContactRelayService, OnboardingService, PortfolioService, SignOutService,
};
use prisma_backend::inbound::http::state::{HttpState, HttpStatePorts};
use prisma_backend::outbound::resend::ResendMailSender;
use prisma_backend::outbound::supabase::{
    SupabaseClient, SupabaseIdentityProvider, SupabaseRestRepository,
};

use super::config::CollaboratorConfig;

/// Build handler state backed by the real collaborators.
///
/// # Errors
///
/// Returns [`io::Error`] when an HTTP client cannot be constructed.
pub fn build_http_state(config: &CollaboratorConfig) -> io::Result<HttpState> {
    let supabase = SupabaseClient::new(config.supabase.clone())
        .map_err(|err| io::Error::other(format!("supabase client: {err}")))?;
    let mailer = ResendMailSender::new(config.resend.clone())
        .map_err(|err| io::Error::other(format!("mail client: {err}")))?;

    let identity = Arc::new(SupabaseIdentityProvider::new(supabase.clone()));
    let store = Arc::new(SupabaseRestRepository::new(supabase));
    let onboarding = Arc::new(OnboardingService::new(store.clone(), store.clone()));

    let ports = HttpStatePorts {
        sign_in: Arc::new(AuthCallbackService::new(identity.clone(), store.clone())),
        sign_out: Arc::new(SignOutService::new(identity)),
        contact: Arc::new(ContactRelayService::new(
            Arc::new(mailer),
            config.mail_from.clone(),
        )),
        catalogue: onboarding.clone(),
        onboarding,
        portfolio: Arc::new(PortfolioService::new(store)),
    };
    Ok(HttpState::new(ports, config.callback.clone()))
}
