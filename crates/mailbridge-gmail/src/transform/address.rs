//! Tolerant parsing of address headers.
//!
//! Address-header syntax in the wild is inconsistent; message display must
//! never fail because of it. Parsing therefore returns best-effort values
//! directly instead of a success/failure result: the fallback path is
//! defined behavior, not an exception.

use mailbridge_core::EmailAddress;

/// Parses a single address header value.
///
/// Understands `Name <addr>`, `"Quoted Name" <addr>`, `<addr>`, and bare
/// `addr` forms. On any malformed input (missing `@`, unbalanced brackets)
/// the result carries the raw input unchanged as the address, with no
/// display name.
#[must_use]
pub fn parse_one(raw: &str) -> EmailAddress {
    try_parse(raw).unwrap_or_else(|| EmailAddress::new(raw))
}

/// Parses an address-list header value (comma-separated, quoted display
/// names may contain commas).
///
/// Entry order is preserved from the source header. An entry whose address
/// part is empty after parsing (a display name with nothing resolvable,
/// e.g. `Bob <>`) is dropped, not defaulted. Empty input yields an empty
/// list.
#[must_use]
pub fn parse_many(raw: &str) -> Vec<EmailAddress> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    split_entries(raw)
        .into_iter()
        .filter_map(parse_entry)
        .collect()
}

/// Strict single-mailbox parse; `None` on anything malformed.
fn try_parse(raw: &str) -> Option<EmailAddress> {
    let trimmed = raw.trim();
    if let Some((name, addr)) = split_angle(trimmed) {
        if addr.is_empty() || !addr.contains('@') {
            return None;
        }
        return Some(make_address(name, addr));
    }
    if !trimmed.is_empty()
        && trimmed.contains('@')
        && !trimmed.contains(['<', '>'])
        && !trimmed.chars().any(char::is_whitespace)
    {
        return Some(EmailAddress::new(trimmed));
    }
    None
}

/// Parses one entry of an address list.
///
/// Looser than [`try_parse`]: an angle pair keeps whatever non-empty address
/// it wraps, and a bare entry survives as-is. Only an empty address drops
/// the entry.
fn parse_entry(raw: &str) -> Option<EmailAddress> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some((name, addr)) = split_angle(trimmed) {
        if addr.is_empty() {
            return None;
        }
        return Some(make_address(name, addr));
    }
    Some(parse_one(trimmed))
}

/// Splits `Name <addr>` around the final angle-bracket pair.
///
/// Returns the raw display-name text and the bracketed address. `None` when
/// there is no complete pair or text trails the closing bracket.
fn split_angle(raw: &str) -> Option<(&str, &str)> {
    let open = raw.rfind('<')?;
    let rest = &raw[open + 1..];
    let close = rest.find('>')?;
    if !rest[close + 1..].trim().is_empty() {
        return None;
    }
    Some((raw[..open].trim_end(), rest[..close].trim()))
}

/// Splits an address list on commas, ignoring commas inside double quotes.
fn split_entries(raw: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, c) in raw.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                entries.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&raw[start..]);
    entries
}

fn make_address(name: &str, addr: &str) -> EmailAddress {
    let name = unquote(name.trim());
    if name.is_empty() {
        EmailAddress::new(addr)
    } else {
        EmailAddress::with_name(name, addr)
    }
}

/// Strips one surrounding pair of double quotes from a display name.
fn unquote(name: &str) -> &str {
    name.strip_prefix('"')
        .and_then(|n| n.strip_suffix('"'))
        .unwrap_or(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_one_with_name() {
        let addr = parse_one("John Doe <john@example.com>");
        assert_eq!(addr.address, "john@example.com");
        assert_eq!(addr.display_name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn test_parse_one_bare_address() {
        let addr = parse_one("jane@example.com");
        assert_eq!(addr.address, "jane@example.com");
        assert!(addr.display_name.is_none());
    }

    #[test]
    fn test_parse_one_quoted_name() {
        let addr = parse_one("\"Doe, John\" <john@example.com>");
        assert_eq!(addr.address, "john@example.com");
        assert_eq!(addr.display_name.as_deref(), Some("Doe, John"));
    }

    #[test]
    fn test_parse_one_bracketed_only() {
        let addr = parse_one("<sole@example.com>");
        assert_eq!(addr.address, "sole@example.com");
        assert!(addr.display_name.is_none());
    }

    #[test]
    fn test_parse_one_missing_at_falls_back() {
        let addr = parse_one("not an address");
        assert_eq!(addr.address, "not an address");
        assert!(addr.display_name.is_none());
    }

    #[test]
    fn test_parse_one_unbalanced_brackets_fall_back() {
        let addr = parse_one("John <john@example.com");
        assert_eq!(addr.address, "John <john@example.com");
        assert!(addr.display_name.is_none());

        let addr = parse_one("John <john@example.com> extra");
        assert_eq!(addr.address, "John <john@example.com> extra");
    }

    #[test]
    fn test_parse_one_empty_brackets_fall_back() {
        let addr = parse_one("Bob <>");
        assert_eq!(addr.address, "Bob <>");
        assert!(addr.display_name.is_none());
    }

    #[test]
    fn test_parse_many_three_entries_in_order() {
        let addrs =
            parse_many("John Doe <john@example.com>, jane@example.com, Bob <bob@example.com>");
        assert_eq!(addrs.len(), 3);
        assert_eq!(addrs[0].address, "john@example.com");
        assert_eq!(addrs[0].display_name.as_deref(), Some("John Doe"));
        assert_eq!(addrs[1].address, "jane@example.com");
        assert!(addrs[1].display_name.is_none());
        assert_eq!(addrs[2].address, "bob@example.com");
        assert_eq!(addrs[2].display_name.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_parse_many_drops_empty_address_entry() {
        let addrs = parse_many("a@x.com, Bob <>, c@x.com");
        assert_eq!(addrs.len(), 2);
        assert_eq!(addrs[0].address, "a@x.com");
        assert_eq!(addrs[1].address, "c@x.com");
    }

    #[test]
    fn test_parse_many_quoted_comma_stays_one_entry() {
        let addrs = parse_many("\"Doe, John\" <john@example.com>, jane@example.com");
        assert_eq!(addrs.len(), 2);
        assert_eq!(addrs[0].display_name.as_deref(), Some("Doe, John"));
        assert_eq!(addrs[1].address, "jane@example.com");
    }

    #[test]
    fn test_parse_many_empty_input() {
        assert!(parse_many("").is_empty());
        assert!(parse_many("   ").is_empty());
    }

    proptest! {
        #[test]
        fn prop_parse_one_keeps_malformed_input(raw in "[^@]*") {
            let parsed = parse_one(&raw);
            prop_assert_eq!(parsed.address, raw);
            prop_assert!(parsed.display_name.is_none());
        }

        #[test]
        fn prop_parse_one_name_addr_form(
            name in "[A-Za-z][A-Za-z ]{0,18}[A-Za-z]",
            local in "[a-z0-9]{1,10}",
            domain in "[a-z0-9]{1,10}\\.[a-z]{2,4}",
        ) {
            let raw = format!("{name} <{local}@{domain}>");
            let parsed = parse_one(&raw);
            prop_assert_eq!(parsed.address, format!("{local}@{domain}"));
            prop_assert_eq!(parsed.display_name, Some(name));
        }
    }
}
