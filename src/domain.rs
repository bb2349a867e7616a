//! Domain-name encoder (component C3): produces canonical wire-format
//! domain names from zone-file text, relative to an origin.
//!
//! Grounded on `dns::rfc::domain::DomainName`'s text <-> label split and its
//! `ToNetworkOrder` wire layout, but running in the opposite direction this
//! crate needs: text -> wire bytes, with the origin-relative and escape
//! handling RFC 1035 §5.1 master-file syntax requires (`DomainName` only
//! implements the simple `split('.')` case, since it only ever decodes
//! names already on the wire).
use crate::error::{Error, Result};

/// Maximum encoded length of a domain name, RFC 1035 §3.1.
const MAX_NAME_LEN: usize = 255;
/// Maximum length of a single label, RFC 1035 §3.1.
const MAX_LABEL_LEN: usize = 63;

/// The wire-format root name: a single terminating zero octet.
pub fn root() -> Vec<u8> {
    vec![0]
}

/// Encodes `text` as a wire-format domain name relative to `origin`, which
/// must itself already be a valid wire-format name (as produced by this
/// function, or by [`root`]).
///
/// - `.` is the root name.
/// - `@` is the literal spelling of "the current origin".
/// - A trailing unescaped `.` makes the name absolute (the origin is not
///   appended); otherwise the name is relative and `origin`'s labels are
///   appended.
/// - `\DDD` (three decimal digits) escapes a single octet; `\X` escapes any
///   other single character, both per RFC 1035 §5.1.
pub fn encode_name(text: &str, origin: &[u8]) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(syntax("empty domain name"));
    }

    if text == "." {
        return Ok(root());
    }

    if text == "@" {
        return Ok(origin.to_vec());
    }

    let absolute = ends_with_unescaped_dot(text);
    let body = if absolute { &text[..text.len() - 1] } else { text };

    let mut wire = Vec::with_capacity(text.len() + 1);
    let mut total_len = 0usize;

    if !body.is_empty() {
        for label in split_labels(body)? {
            if label.is_empty() {
                return Err(syntax("empty label in domain name"));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(syntax("domain label longer than 63 bytes"));
            }
            wire.push(label.len() as u8);
            wire.extend_from_slice(&label);
            total_len += label.len() + 1;
        }
    }

    if absolute {
        wire.push(0);
        total_len += 1;
    } else {
        total_len += origin.len();
        wire.extend_from_slice(origin);
    }

    if total_len > MAX_NAME_LEN {
        return Err(syntax("domain name longer than 255 bytes"));
    }

    Ok(wire)
}

fn syntax(msg: &str) -> Error {
    crate::error::SyntaxError::new(msg, String::new(), 0).into()
}

/// `true` if `text` ends with a `.` that is not itself escaped (`\.`).
fn ends_with_unescaped_dot(text: &str) -> bool {
    if !text.ends_with('.') {
        return false;
    }
    let mut backslashes = 0;
    for c in text[..text.len() - 1].chars().rev() {
        if c == '\\' {
            backslashes += 1;
        } else {
            break;
        }
    }
    backslashes % 2 == 0
}

/// Splits `body` on unescaped `.` into decoded label byte strings, handling
/// `\DDD` and `\X` escapes within each label.
fn split_labels(body: &str) -> Result<Vec<Vec<u8>>> {
    let chars: Vec<char> = body.chars().collect();
    let mut labels = Vec::new();
    let mut current = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                i += 1;
                if i >= chars.len() {
                    return Err(syntax("dangling escape in domain name"));
                }
                if chars[i].is_ascii_digit() {
                    if i + 2 >= chars.len()
                        || !chars[i + 1].is_ascii_digit()
                        || !chars[i + 2].is_ascii_digit()
                    {
                        return Err(syntax("invalid \\DDD escape in domain name"));
                    }
                    let value: u32 = chars[i..i + 3]
                        .iter()
                        .collect::<String>()
                        .parse()
                        .map_err(|_| syntax("invalid \\DDD escape in domain name"))?;
                    if value > 255 {
                        return Err(syntax("\\DDD escape out of range in domain name"));
                    }
                    current.push(value as u8);
                    i += 3;
                } else {
                    let mut buf = [0u8; 4];
                    current.extend_from_slice(chars[i].encode_utf8(&mut buf).as_bytes());
                    i += 1;
                }
            }
            '.' => {
                labels.push(std::mem::take(&mut current));
                i += 1;
            }
            c => {
                let mut buf = [0u8; 4];
                current.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                i += 1;
            }
        }
    }
    labels.push(current);

    Ok(labels)
}

/// Splits a wire-format domain name into its raw label byte slices,
/// excluding the terminating zero octet. Used when a relative name must be
/// combined with the current origin's labels, and by tests checking the
/// encode/decode round trip.
pub fn wire_labels(wire: &[u8]) -> Vec<&[u8]> {
    let mut labels = Vec::new();
    let mut i = 0;
    while i < wire.len() {
        let len = wire[i] as usize;
        if len == 0 {
            break;
        }
        i += 1;
        if i + len > wire.len() {
            break;
        }
        labels.push(&wire[i..i + len]);
        i += len;
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_single_zero_octet() {
        assert_eq!(encode_name(".", &root()).unwrap(), vec![0]);
    }

    #[test]
    fn absolute_name_ignores_origin() {
        let origin = encode_name("example.net.", &root()).unwrap();
        let wire = encode_name("www.example.com.", &origin).unwrap();
        assert_eq!(
            wire,
            vec![3, b'w', b'w', b'w', 7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0]
        );
    }

    #[test]
    fn relative_name_appends_origin() {
        let origin = encode_name("example.com.", &root()).unwrap();
        let wire = encode_name("www", &origin).unwrap();
        assert_eq!(wire, encode_name("www.example.com.", &root()).unwrap());
    }

    #[test]
    fn at_sign_is_current_origin() {
        let origin = encode_name("example.com.", &root()).unwrap();
        assert_eq!(encode_name("@", &origin).unwrap(), origin);
    }

    #[test]
    fn decimal_escape() {
        let wire = encode_name("a\\046b.com.", &root()).unwrap();
        // a\046b -> "a.b" as ONE label (46 decimal == '.')
        assert_eq!(wire_labels(&wire)[0], b"a.b");
    }

    #[test]
    fn literal_escape() {
        let wire = encode_name("a\\.b.com.", &root()).unwrap();
        assert_eq!(wire_labels(&wire)[0], b"a.b");
        assert_eq!(wire_labels(&wire).len(), 2);
    }

    #[test]
    fn empty_label_is_rejected() {
        assert!(encode_name("foo..bar.", &root()).is_err());
    }

    #[test]
    fn label_too_long_is_rejected() {
        let label = "a".repeat(64);
        assert!(encode_name(&format!("{label}."), &root()).is_err());
    }

    #[test]
    fn round_trip_identity() {
        let origin = encode_name("example.com.", &root()).unwrap();
        let wire = encode_name("mail", &origin).unwrap();
        let labels: Vec<&[u8]> = wire_labels(&wire);
        assert_eq!(labels, vec![b"mail".as_slice(), b"example", b"com"]);
    }
}
