//! Driven port for the email-delivery provider.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::OutboundEmail;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail sender adapters.
    ///
    /// `message` is the provider's own explanation and is shown to callers.
    pub enum MailSenderError {
        /// The provider rejected the email.
        Rejected => "{message}",
        /// The provider did not answer in time.
        Timeout => "{message}",
        /// The provider could not be reached.
        Transport => "{message}",
    }
}

/// Provider acknowledgement, passed through to the caller untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct MailReceipt(pub Value);

/// Port for delivering a rendered email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Deliver `email`.
    async fn send(&self, email: &OutboundEmail) -> Result<MailReceipt, MailSenderError>;
}
