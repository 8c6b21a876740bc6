//! Conversion of provider message payloads into domain records.
//!
//! [`to_summary`] and [`to_detail`] are pure functions of the wire message:
//! no I/O, no mutation, same input yields the same output. Malformed header
//! and body content degrades per the parser and walker rules; the only
//! failure path is a payload missing its internal timestamp, which is a
//! malformed provider response.

pub mod address;
pub mod payload;

use chrono::{DateTime, Utc};
use mailbridge_core::{
    EmailAddress, EmailDetail, EmailStatus, EmailSummary, Error, NO_SUBJECT, Result,
};

use crate::wire;

/// Label the provider attaches to unread messages.
const UNREAD_LABEL: &str = "UNREAD";

/// Builds a listing summary from one provider message.
///
/// Cheap by design: beyond the boolean attachment check, no body or
/// attachment extraction happens, so metadata-only payloads transform
/// without loss.
///
/// # Errors
///
/// Returns [`Error::Service`] when the payload carries no usable internal
/// timestamp.
pub fn to_summary(message: &wire::Message) -> Result<EmailSummary> {
    Ok(EmailSummary {
        id: message.id.clone(),
        sender: sender(&message.payload),
        subject: subject(&message.payload),
        sent_at: sent_at(message)?,
        status: status(&message.label_ids),
        has_attachments: payload::has_attachment(&message.payload),
        preview: message.snippet.clone(),
    })
}

/// Builds the full detail record from one provider message.
///
/// # Errors
///
/// Returns [`Error::Service`] when the payload carries no usable internal
/// timestamp.
pub fn to_detail(message: &wire::Message) -> Result<EmailDetail> {
    let (body_text, body_html) = payload::extract_bodies(&message.payload);

    Ok(EmailDetail {
        id: message.id.clone(),
        sender: sender(&message.payload),
        to: recipients(&message.payload, "To"),
        cc: recipients(&message.payload, "Cc"),
        bcc: recipients(&message.payload, "Bcc"),
        subject: subject(&message.payload),
        sent_at: sent_at(message)?,
        status: status(&message.label_ids),
        body_text,
        body_html,
        attachments: payload::extract_attachments(&message.payload),
        thread_id: message.thread_id.clone(),
        labels: message.label_ids.clone(),
    })
}

/// Looks up a header by exact, case-sensitive name. The first occurrence
/// wins when the provider sends duplicates.
fn first_header<'a>(payload: &'a wire::MessagePart, name: &str) -> Option<&'a str> {
    payload
        .headers
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.value.as_str())
}

fn sender(payload: &wire::MessagePart) -> EmailAddress {
    first_header(payload, "From").map_or_else(EmailAddress::unknown, address::parse_one)
}

fn recipients(payload: &wire::MessagePart, header: &str) -> Vec<EmailAddress> {
    first_header(payload, header).map_or_else(Vec::new, address::parse_many)
}

fn subject(payload: &wire::MessagePart) -> String {
    first_header(payload, "Subject")
        .unwrap_or(NO_SUBJECT)
        .to_string()
}

fn status(labels: &[String]) -> EmailStatus {
    if labels.iter().any(|l| l == UNREAD_LABEL) {
        EmailStatus::Unread
    } else {
        EmailStatus::Read
    }
}

/// Receive time from the provider's epoch-millisecond internal timestamp.
/// The `Date` header is client-supplied and never consulted.
fn sent_at(message: &wire::Message) -> Result<DateTime<Utc>> {
    let raw = message
        .internal_date
        .as_deref()
        .ok_or_else(|| Error::Service(format!("message {} has no internal date", message.id)))?;
    let millis: i64 = raw.parse().map_err(|_| {
        Error::Service(format!(
            "message {} has malformed internal date: {raw}",
            message.id
        ))
    })?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        Error::Service(format!(
            "message {} internal date out of range: {raw}",
            message.id
        ))
    })
}
