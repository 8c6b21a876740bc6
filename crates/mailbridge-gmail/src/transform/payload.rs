//! Traversal of the nested MIME part tree of a message payload.
//!
//! One depth-first, pre-order walk serves three operations with different
//! fold policies: first-match-wins for the text and HTML bodies,
//! collect-all for attachments, and short-circuit existence for the
//! attachment check. A corrupt part never aborts extraction of the rest of
//! the message.

use std::ops::ControlFlow;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use mailbridge_core::Attachment;

use crate::wire::MessagePart;

/// Filename used when an attachment part does not declare one.
const UNNAMED: &str = "unnamed";

/// MIME type used when an attachment part does not declare one.
const OCTET_STREAM: &str = "application/octet-stream";

const TEXT_PLAIN: &str = "text/plain";
const TEXT_HTML: &str = "text/html";

/// Gmail emits inline body data as URL-safe base64, both padded and
/// unpadded, so decoding must accept either.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Extracts the first plain-text body and the first HTML body, in traversal
/// order.
///
/// A part counts only if its MIME type matches exactly and it carries inline
/// body data that decodes to UTF-8. The first successful match per type is
/// kept and never overwritten; a part whose data fails to decode contributes
/// nothing and the walk continues.
#[must_use]
pub fn extract_bodies(root: &MessagePart) -> (Option<String>, Option<String>) {
    let mut text = None;
    let mut html = None;
    let _ = walk(root, &mut |part| {
        match part.mime_type.as_deref() {
            Some(TEXT_PLAIN) if text.is_none() => text = decode_inline_body(part),
            Some(TEXT_HTML) if html.is_none() => html = decode_inline_body(part),
            _ => {}
        }
        if text.is_some() && html.is_some() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    (text, html)
}

/// Reports whether any part of the tree carries an attachment reference.
///
/// Stops at the first hit; otherwise every branch is visited.
#[must_use]
pub fn has_attachment(root: &MessagePart) -> bool {
    walk(root, &mut |part| {
        if attachment_ref(part).is_some() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .is_break()
}

/// Collects a descriptor for every attachment-carrying part, at any depth,
/// in traversal order.
#[must_use]
pub fn extract_attachments(root: &MessagePart) -> Vec<Attachment> {
    let mut attachments = Vec::new();
    let _ = walk(root, &mut |part| {
        if let Some(id) = attachment_ref(part) {
            attachments.push(Attachment {
                filename: part
                    .filename
                    .clone()
                    .unwrap_or_else(|| UNNAMED.to_string()),
                mime_type: part
                    .mime_type
                    .clone()
                    .unwrap_or_else(|| OCTET_STREAM.to_string()),
                size_bytes: part.body.as_ref().map_or(0, |b| b.size),
                attachment_ref: id.to_string(),
            });
        }
        ControlFlow::Continue(())
    });
    attachments
}

/// Depth-first pre-order walk; children are visited in wire order. The
/// visitor short-circuits the whole walk by returning `Break`.
fn walk(
    part: &MessagePart,
    visit: &mut impl FnMut(&MessagePart) -> ControlFlow<()>,
) -> ControlFlow<()> {
    visit(part)?;
    for child in &part.parts {
        walk(child, visit)?;
    }
    ControlFlow::Continue(())
}

/// A part is an attachment iff its body carries a non-empty attachment
/// reference, regardless of MIME type.
fn attachment_ref(part: &MessagePart) -> Option<&str> {
    part.body
        .as_ref()?
        .attachment_id
        .as_deref()
        .filter(|id| !id.is_empty())
}

/// Decodes a part's inline body data to a string.
///
/// `None` when the part has no inline data, or when base64 or UTF-8
/// decoding fails.
fn decode_inline_body(part: &MessagePart) -> Option<String> {
    let data = part.body.as_ref()?.data.as_deref()?;
    let bytes = URL_SAFE_LENIENT.decode(data).ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::wire::PartBody;

    fn leaf(mime: &str, data: &str) -> MessagePart {
        MessagePart {
            mime_type: Some(mime.to_string()),
            body: Some(PartBody {
                data: Some(data.to_string()),
                ..PartBody::default()
            }),
            ..MessagePart::default()
        }
    }

    fn container(mime: &str, parts: Vec<MessagePart>) -> MessagePart {
        MessagePart {
            mime_type: Some(mime.to_string()),
            parts,
            ..MessagePart::default()
        }
    }

    fn attachment(filename: Option<&str>, id: &str, size: u64) -> MessagePart {
        MessagePart {
            mime_type: Some("application/pdf".to_string()),
            filename: filename.map(ToString::to_string),
            body: Some(PartBody {
                attachment_id: Some(id.to_string()),
                size,
                ..PartBody::default()
            }),
            ..MessagePart::default()
        }
    }

    #[test]
    fn test_single_part_body() {
        let root = leaf("text/plain", "cGxhaW4gYm9keQ==");
        let (text, html) = extract_bodies(&root);
        assert_eq!(text.as_deref(), Some("plain body"));
        assert!(html.is_none());
    }

    #[test]
    fn test_alternative_extracts_both_bodies() {
        let root = container(
            "multipart/alternative",
            vec![
                leaf("text/plain", "cGxhaW4gYm9keQ=="),
                leaf("text/html", "PHA-aGk8L3A-"),
            ],
        );
        let (text, html) = extract_bodies(&root);
        assert_eq!(text.as_deref(), Some("plain body"));
        assert_eq!(html.as_deref(), Some("<p>hi</p>"));
    }

    #[test]
    fn test_first_text_part_wins() {
        let root = container(
            "multipart/mixed",
            vec![
                leaf("text/plain", "Zmlyc3Q="),
                leaf("text/plain", "c2Vjb25k"),
            ],
        );
        let (text, _) = extract_bodies(&root);
        assert_eq!(text.as_deref(), Some("first"));
    }

    #[test]
    fn test_first_seen_empty_body_wins() {
        // Literal first-seen policy: an empty decoded body still claims the
        // slot ahead of later parts.
        let root = container(
            "multipart/mixed",
            vec![leaf("text/plain", ""), leaf("text/plain", "c2Vjb25k")],
        );
        let (text, _) = extract_bodies(&root);
        assert_eq!(text.as_deref(), Some(""));
    }

    #[test]
    fn test_undecodable_part_is_skipped() {
        let root = container(
            "multipart/mixed",
            vec![
                leaf("text/plain", "!!! not base64 !!!"),
                leaf("text/plain", "ZmFsbGJhY2s="),
            ],
        );
        let (text, _) = extract_bodies(&root);
        assert_eq!(text.as_deref(), Some("fallback"));
    }

    #[test]
    fn test_unpadded_base64url_decodes() {
        let root = leaf("text/plain", "aGk");
        let (text, _) = extract_bodies(&root);
        assert_eq!(text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_part_without_data_is_not_a_candidate() {
        let mut empty = leaf("text/plain", "");
        empty.body = None;
        let root = container("multipart/mixed", vec![empty, leaf("text/plain", "aGk=")]);
        let (text, _) = extract_bodies(&root);
        assert_eq!(text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_nested_attachment_found() {
        let root = container(
            "multipart/mixed",
            vec![
                leaf("text/plain", "aGk="),
                container(
                    "multipart/related",
                    vec![container(
                        "multipart/alternative",
                        vec![attachment(Some("report.pdf"), "att-1", 2048)],
                    )],
                ),
            ],
        );

        assert!(has_attachment(&root));
        let attachments = extract_attachments(&root);
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].filename, "report.pdf");
        assert_eq!(attachments[0].size_bytes, 2048);
        assert_eq!(attachments[0].attachment_ref, "att-1");
    }

    #[test]
    fn test_no_attachment_in_inline_only_tree() {
        let root = container(
            "multipart/alternative",
            vec![leaf("text/plain", "aGk="), leaf("text/html", "PHA-aGk8L3A-")],
        );
        assert!(!has_attachment(&root));
        assert!(extract_attachments(&root).is_empty());
    }

    #[test]
    fn test_attachment_defaults() {
        let mut part = attachment(None, "att-2", 0);
        part.mime_type = None;
        let root = container("multipart/mixed", vec![part]);

        let attachments = extract_attachments(&root);
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].filename, "unnamed");
        assert_eq!(attachments[0].mime_type, "application/octet-stream");
        assert_eq!(attachments[0].size_bytes, 0);
    }

    #[test]
    fn test_empty_attachment_id_is_ignored() {
        let root = container("multipart/mixed", vec![attachment(Some("x"), "", 1)]);
        assert!(!has_attachment(&root));
        assert!(extract_attachments(&root).is_empty());
    }

    #[test]
    fn test_collects_attachments_across_branches() {
        let root = container(
            "multipart/mixed",
            vec![
                attachment(Some("a.txt"), "att-a", 1),
                container(
                    "multipart/mixed",
                    vec![attachment(Some("b.txt"), "att-b", 2)],
                ),
                attachment(Some("c.txt"), "att-c", 3),
            ],
        );
        let names: Vec<_> = extract_attachments(&root)
            .into_iter()
            .map(|a| a.filename)
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_bare_multipart_node_contributes_nothing() {
        let root = container("multipart/mixed", Vec::new());
        let (text, html) = extract_bodies(&root);
        assert!(text.is_none());
        assert!(html.is_none());
        assert!(!has_attachment(&root));
    }
}
