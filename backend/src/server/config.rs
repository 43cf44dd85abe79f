//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use prisma_backend::inbound::http::session_config::SessionSettings;
use prisma_backend::inbound::http::state::CallbackSettings;
use prisma_backend::outbound::resend::ResendConfig;
use prisma_backend::outbound::supabase::SupabaseConfig;

/// Everything the outbound adapters need to reach their services.
#[derive(Clone)]
pub struct CollaboratorConfig {
    /// Identity and data service.
    pub supabase: SupabaseConfig,
    /// Email-delivery API.
    pub resend: ResendConfig,
    /// Sender mailbox for relayed contact messages.
    pub mail_from: String,
    /// Redirect and verifier-cookie settings of the sign-in callback.
    pub callback: CallbackSettings,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) collaborators: CollaboratorConfig,
}

impl ServerConfig {
    /// Construct a server configuration from validated settings.
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        collaborators: CollaboratorConfig,
    ) -> Self {
        Self {
            session,
            bind_addr,
            collaborators,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
