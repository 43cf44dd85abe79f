//! Backend entry-point: loads settings and runs the HTTP server.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use prisma_backend::inbound::http::health::HealthState;
use prisma_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use prisma_backend::inbound::http::state::CallbackSettings;
use prisma_backend::outbound::resend::ResendConfig;
use prisma_backend::outbound::supabase::SupabaseConfig;
use prisma_backend::settings::AppSettings;
use server::{CollaboratorConfig, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %session.key_fingerprint(),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let timeout = settings.request_timeout();
    let collaborators = CollaboratorConfig {
        supabase: SupabaseConfig {
            base_url: settings.supabase_url()?,
            anon_key: settings.supabase_anon_key()?,
            timeout,
        },
        resend: ResendConfig {
            base_url: settings.resend_url()?,
            api_key: settings.resend_api_key()?,
            timeout,
        },
        mail_from: settings.mail_from().to_owned(),
        callback: CallbackSettings {
            deployment: settings.deployment(),
            code_verifier_cookie: settings.code_verifier_cookie()?,
        },
    };

    let config = ServerConfig::new(session, settings.bind_addr()?, collaborators);
    let bind_addr = config.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to start server on {bind_addr}"))?;
    info!(%bind_addr, deployment = ?settings.deployment(), "listening");

    server.await.wrap_err("server terminated with an error")
}
