//! Contact-form messages relayed to a student's inbox.
//!
//! A visitor on a public portfolio writes to its owner. The message is
//! validated here and rendered into an [`OutboundEmail`] that the mail port
//! delivers; the visitor's address becomes the `Reply-To`.

use std::fmt;

use serde::Serialize;

/// Why a contact payload was rejected.
///
/// Address shape is left to the mail provider, whose rejection surfaces as a
/// delivery failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    /// `name`, `email`, `message` or `toEmail` was absent or blank.
    MissingFields,
}

impl fmt::Display for ContactValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Missing required fields"),
        }
    }
}

impl std::error::Error for ContactValidationError {}

/// Raw contact payload as received, every field optional.
#[derive(Debug, Clone, Default)]
pub struct ContactDraft<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub message: Option<&'a str>,
    pub to_email: Option<&'a str>,
    pub to_name: Option<&'a str>,
}

/// Validated contact message.
///
/// ## Invariants
/// - `name`, `email`, `message` and `to_email` are non-blank, with
///   surrounding whitespace trimmed.
/// - `to_name`, when present, is non-blank.
///
/// # Examples
/// ```
/// use prisma_backend::domain::{ContactDraft, ContactMessage};
///
/// let message = ContactMessage::try_from_draft(ContactDraft {
///     name: Some("Ana"),
///     email: Some("a@x.com"),
///     message: Some("hi"),
///     to_email: Some("b@x.com"),
///     to_name: None,
/// })
/// .unwrap();
/// assert_eq!(message.name(), "Ana");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    name: String,
    email: String,
    message: String,
    to_email: String,
    to_name: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

impl ContactMessage {
    /// Validate a draft: every required field must be present and non-blank.
    pub fn try_from_draft(draft: ContactDraft<'_>) -> Result<Self, ContactValidationError> {
        let (Some(name), Some(email), Some(message), Some(to_email)) = (
            present(draft.name),
            present(draft.email),
            present(draft.message),
            present(draft.to_email),
        ) else {
            return Err(ContactValidationError::MissingFields);
        };
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
            to_email: to_email.to_owned(),
            to_name: present(draft.to_name).map(str::to_owned),
        })
    }

    /// Sender's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sender's reply address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Message body as typed.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Recipient address.
    pub fn to_email(&self) -> &str {
        &self.to_email
    }

    /// Recipient display name.
    pub fn to_name(&self) -> Option<&str> {
        self.to_name.as_deref()
    }

    /// Render the email delivered to the recipient.
    pub fn render(&self, from: &str) -> OutboundEmail {
        let greeting = match self.to_name() {
            Some(to_name) => format!("Hi {to_name},"),
            None => "Hi,".to_owned(),
        };
        let intro = format!(
            "{name} ({email}) sent you a message through your Prisma portfolio:",
            name = self.name,
            email = self.email,
        );

        let text = format!(
            "{greeting}\n\n{intro}\n\n{message}\n\nReply to this email to answer {name}.\n",
            message = self.message,
            name = self.name,
        );
        let html = format!(
            concat!(
                "<p>{greeting}</p>",
                "<p>{intro}</p>",
                "<blockquote>{message}</blockquote>",
                "<p>Reply to this email to answer {name}.</p>",
            ),
            greeting = escape_html(&greeting),
            intro = escape_html(&intro),
            message = escape_html(&self.message).replace('\n', "<br>"),
            name = escape_html(&self.name),
        );

        OutboundEmail {
            from: from.to_owned(),
            to: vec![self.to_email.clone()],
            reply_to: Some(self.email.clone()),
            subject: format!("New message from {} via Prisma", self.name),
            html,
            text,
        }
    }
}

/// Provider-neutral email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    /// Sender mailbox, e.g. `Prisma <hello@prisma.app>`.
    pub from: String,
    /// Recipients.
    pub to: Vec<String>,
    /// Address replies go to.
    pub reply_to: Option<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body with user content escaped.
    pub html: String,
    /// Plain-text alternative.
    pub text: String,
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
