//! Email delivery adapter.
//!
//! This module provides a thin HTTP implementation of the `MailSender` port.

mod http_sender;

pub use http_sender::{ResendConfig, ResendMailSender};
