//! Serde model of the Gmail REST message shape.
//!
//! Field names map one-to-one onto the provider JSON; everything the
//! transformer consumes comes through these types. Optional fields default
//! rather than fail: a sparse payload is the provider's prerogative and is
//! handled downstream by the transformation rules.

use serde::Deserialize;

/// One message as returned by `users.messages.get`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message id.
    pub id: String,
    /// Thread the message belongs to.
    pub thread_id: String,
    /// Label ids attached to the message.
    #[serde(default)]
    pub label_ids: Vec<String>,
    /// Short provider-generated preview of the content.
    #[serde(default)]
    pub snippet: String,
    /// Receive time as a string of epoch milliseconds. The `Date` header is
    /// client-supplied and untrusted; this field is the authoritative
    /// timestamp.
    pub internal_date: Option<String>,
    /// Root of the MIME part tree.
    pub payload: MessagePart,
}

/// One node of the MIME part tree: a leaf (body or attachment) or a
/// multipart container.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    /// Declared MIME type of the part.
    pub mime_type: Option<String>,
    /// Filename, present on attachment parts.
    pub filename: Option<String>,
    /// Headers carried by this part, in wire order.
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Inline body descriptor, if the part carries one.
    pub body: Option<PartBody>,
    /// Child parts, in wire order.
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

/// Body descriptor of a part.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartBody {
    /// Provider handle for fetching attachment content separately.
    pub attachment_id: Option<String>,
    /// Body size in bytes.
    #[serde(default)]
    pub size: u64,
    /// Inline body data, URL-safe base64.
    pub data: Option<String>,
}

/// A single message header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Header {
    /// Header name, as sent by the provider.
    pub name: String,
    /// Header value.
    pub value: String,
}

/// Response of `users.messages.list`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageList {
    /// Message references in listing order.
    #[serde(default)]
    pub messages: Vec<MessageRef>,
    /// Token for the next page; absent on the last page.
    pub next_page_token: Option<String>,
}

/// Reference to a message in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageRef {
    /// Message id, resolved to a full record in a follow-up call.
    pub id: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_message_deserializes_provider_json() {
        let json = serde_json::json!({
            "id": "m1",
            "threadId": "t1",
            "labelIds": ["INBOX", "UNREAD"],
            "snippet": "hello",
            "internalDate": "1640995200000",
            "payload": {
                "mimeType": "text/plain",
                "headers": [{"name": "From", "value": "a@x.com"}],
                "body": {"data": "aGk=", "size": 2}
            }
        });

        let msg: Message = serde_json::from_value(json).unwrap();
        assert_eq!(msg.id, "m1");
        assert_eq!(msg.thread_id, "t1");
        assert_eq!(msg.label_ids, vec!["INBOX", "UNREAD"]);
        assert_eq!(msg.internal_date.as_deref(), Some("1640995200000"));
        assert_eq!(msg.payload.mime_type.as_deref(), Some("text/plain"));
        assert_eq!(msg.payload.headers[0].name, "From");
        assert_eq!(msg.payload.body.unwrap().size, 2);
    }

    #[test]
    fn test_sparse_payload_defaults() {
        let json = serde_json::json!({
            "id": "m2",
            "threadId": "t2",
            "payload": {}
        });

        let msg: Message = serde_json::from_value(json).unwrap();
        assert!(msg.label_ids.is_empty());
        assert!(msg.snippet.is_empty());
        assert!(msg.internal_date.is_none());
        assert!(msg.payload.body.is_none());
        assert!(msg.payload.parts.is_empty());
    }

    #[test]
    fn test_message_list_defaults() {
        let json = serde_json::json!({});
        let list: MessageList = serde_json::from_value(json).unwrap();
        assert!(list.messages.is_empty());
        assert!(list.next_page_token.is_none());
    }
}
