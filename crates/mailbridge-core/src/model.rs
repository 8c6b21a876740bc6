//! Domain models for mail reading.
//!
//! All types are transient values, rebuilt from each provider response.
//! Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder subject used when a message carries no Subject header.
pub const NO_SUBJECT: &str = "(No Subject)";

/// Read status of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmailStatus {
    /// The message has been read.
    Read,
    /// The message has not been read.
    Unread,
}

/// An email address with optional display name.
///
/// Equality is by value. Renders as `Name <addr>` when a display name is
/// present, bare address otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress {
    /// The address itself (e.g. `user@example.com`).
    pub address: String,
    /// Display name, if one was present in the source header.
    pub display_name: Option<String>,
}

impl EmailAddress {
    /// Creates an address without a display name.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            display_name: None,
        }
    }

    /// Creates an address with a display name.
    #[must_use]
    pub fn with_name(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            display_name: Some(name.into()),
        }
    }

    /// Sentinel returned when a sender header is missing entirely.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new("Unknown")
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{name} <{}>", self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// Descriptor for an email attachment.
///
/// Carries metadata only; content is fetched separately through the
/// provider handle in `attachment_ref`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment filename.
    pub filename: String,
    /// MIME type of the attachment.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Opaque provider handle for fetching the content.
    pub attachment_ref: String,
}

/// Summary of a message, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSummary {
    /// Unique message identifier.
    pub id: String,
    /// Sender address.
    pub sender: EmailAddress,
    /// Message subject.
    pub subject: String,
    /// When the message was received, per the provider's internal clock.
    pub sent_at: DateTime<Utc>,
    /// Read status.
    pub status: EmailStatus,
    /// Whether the message carries at least one attachment.
    pub has_attachments: bool,
    /// Short preview of the message content.
    pub preview: String,
}

/// Full content of a message, for single-message reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDetail {
    /// Unique message identifier.
    pub id: String,
    /// Sender address.
    pub sender: EmailAddress,
    /// Primary recipients, in header order.
    pub to: Vec<EmailAddress>,
    /// CC recipients, in header order.
    pub cc: Vec<EmailAddress>,
    /// BCC recipients, in header order.
    pub bcc: Vec<EmailAddress>,
    /// Message subject.
    pub subject: String,
    /// When the message was received, per the provider's internal clock.
    pub sent_at: DateTime<Utc>,
    /// Read status.
    pub status: EmailStatus,
    /// Plain text body, if any part supplied one.
    pub body_text: Option<String>,
    /// HTML body, if any part supplied one.
    pub body_html: Option<String>,
    /// Attachment descriptors, in payload order.
    pub attachments: Vec<Attachment>,
    /// Thread the message belongs to.
    pub thread_id: String,
    /// Provider label set, verbatim. Drives `status` and exposes
    /// finer-grained state (starred, important) to callers that need it.
    pub labels: Vec<String>,
}

/// One page of summaries plus the token for the next page, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPage {
    /// Summaries in listing order.
    pub summaries: Vec<EmailSummary>,
    /// Token to pass back for the next page; `None` on the last page.
    pub next_page_token: Option<String>,
}
