//! Driving port for the contact-form mail relay.

use async_trait::async_trait;

use crate::domain::{ContactMessage, DomainError};

use super::MailReceipt;

/// Use-case port that forwards a contact message to its recipient.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRelay: Send + Sync {
    /// Deliver `message`, returning the provider acknowledgement.
    ///
    /// Delivery failures carry the provider's message verbatim.
    async fn relay(&self, message: &ContactMessage) -> Result<MailReceipt, DomainError>;
}
