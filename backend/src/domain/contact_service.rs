//! Contact-form relay service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{ContactRelay, MailReceipt, MailSender, MailSenderError};
use crate::domain::{ContactMessage, DomainError};

/// Service rendering contact messages and handing them to the mail provider.
#[derive(Clone)]
pub struct ContactRelayService<M> {
    sender: Arc<M>,
    from: String,
}

impl<M> ContactRelayService<M> {
    /// Create a relay sending from the `from` mailbox.
    pub fn new(sender: Arc<M>, from: impl Into<String>) -> Self {
        Self {
            sender,
            from: from.into(),
        }
    }
}

fn map_mail_error(error: MailSenderError) -> DomainError {
    match error {
        MailSenderError::Timeout { message } => DomainError::service_unavailable(message),
        MailSenderError::Rejected { message } | MailSenderError::Transport { message } => {
            DomainError::internal(message)
        }
    }
}

#[async_trait]
impl<M> ContactRelay for ContactRelayService<M>
where
    M: MailSender,
{
    async fn relay(&self, message: &ContactMessage) -> Result<MailReceipt, DomainError> {
        let email = message.render(&self.from);
        match self.sender.send(&email).await {
            Ok(receipt) => {
                info!(recipient = %message.to_email(), "contact message relayed");
                Ok(receipt)
            }
            Err(err) => {
                warn!(recipient = %message.to_email(), error = %err, "contact relay failed");
                Err(map_mail_error(err))
            }
        }
    }
}
