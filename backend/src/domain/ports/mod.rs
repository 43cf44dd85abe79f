//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`IdentityProvider`], [`MailSender`]) are
//! implemented by outbound adapters. Driving ports ([`SignInCallback`],
//! [`ContactRelay`] and friends) are what inbound adapters call, so HTTP
//! handler tests can swap in doubles.

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_repository;
mod contact_relay;
mod identity_provider;
mod mail_sender;
mod onboarding_command;
mod portfolio_query;
mod portfolio_repository;
mod profile_repository;
mod sign_in;

#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use catalogue_repository::{CatalogueRepository, CatalogueRepositoryError};
#[cfg(test)]
pub use contact_relay::MockContactRelay;
pub use contact_relay::ContactRelay;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use mail_sender::MockMailSender;
pub use mail_sender::{MailReceipt, MailSender, MailSenderError};
#[cfg(test)]
pub use onboarding_command::{MockCatalogueQuery, MockOnboardingCommand};
pub use onboarding_command::{CatalogueQuery, OnboardingCommand};
#[cfg(test)]
pub use portfolio_query::MockPortfolioQuery;
pub use portfolio_query::PortfolioQuery;
#[cfg(test)]
pub use portfolio_repository::MockPortfolioRepository;
pub use portfolio_repository::{PortfolioRepository, PortfolioRepositoryError};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use sign_in::{MockSignInCallback, MockSignOutCommand};
pub use sign_in::{SignInCallback, SignInOutcome, SignOutCommand};
