//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed entities the HTTP layer and the
//! outbound adapters exchange, plus the services implementing the driving
//! ports. Nothing here knows about actix or reqwest.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-agnostic error payload.
//! - AuthSession, CodeExchange: identity provider session data.
//! - Destination, NextPath, RedirectBase: post-sign-in redirect decision.
//! - ContactMessage, OutboundEmail: mail relay payloads.
//! - University, Career, AcademicSelection: onboarding catalogue.
//! - Portfolio and its records: dashboard and public profile read model.

pub mod auth;
mod auth_service;
pub mod catalogue;
pub mod contact;
mod contact_service;
pub mod error;
mod onboarding_service;
pub mod portfolio;
mod portfolio_service;
pub mod ports;
pub mod profile;
pub mod redirect;
pub mod trace_id;
pub mod user;

pub use self::auth::{AuthCode, AuthSession, AuthValidationError, CodeExchange, SessionToken};
pub use self::auth_service::{AuthCallbackService, SignOutService};
pub use self::catalogue::{Career, University};
pub use self::contact::{ContactDraft, ContactMessage, ContactValidationError, OutboundEmail};
pub use self::contact_service::ContactRelayService;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::onboarding_service::OnboardingService;
pub use self::portfolio::{
    Achievement, FrequencyCount, Portfolio, Project, PublicProfile, achievement_categories,
    featured_projects, top_skills,
};
pub use self::portfolio_service::PortfolioService;
pub use self::profile::{
    AcademicSelection, AcademicSelectionError, ProfileCompleteness, ReferenceId,
};
pub use self::redirect::{
    AUTH_ERROR_PATH, DASHBOARD_PATH, Deployment, Destination, NextPath, ONBOARDING_PATH,
    RedirectBase, SITE_ROOT,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError, Username};

