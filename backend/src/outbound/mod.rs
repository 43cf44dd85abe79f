//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **supabase**: identity provider and data API of the backend-as-a-service
//! - **resend**: email delivery
//!
//! Adapters are thin translators that convert between domain types and
//! wire representations. They contain no business logic.

pub mod resend;
pub mod supabase;

/// Collapse whitespace and cap an upstream body for log and error messages.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// `status 502` or `status 502: <preview>`.
pub(crate) fn status_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}
