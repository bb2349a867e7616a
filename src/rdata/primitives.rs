//! Primitive RDATA field parsers (component C7): each converts one or more
//! already-tokenized strings into the raw wire bytes of a single RDATA
//! field.
//!
//! Grounded on the numeric/address parsers scattered through
//! `dns/src/rfc/*.rs` (`a.rs`, `aaaa.rs`, `char_string.rs`) and on
//! `zrdata()` in `zparser.c` for the token-consumption rules: decimal
//! fields reject trailing garbage, `<character-string>` is length-prefixed
//! and capped at 255 bytes, and base64/LOC are the two primitives that
//! consume every remaining token rather than just one.
use std::net::{Ipv4Addr, Ipv6Addr};

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::{b64, loc};

/// Maximum length of a single RDATA field's byte content (MAXRDATAELEMSIZE).
pub const MAXRDATAELEMSIZE: usize = 32_768;

fn syntax(msg: impl Into<String>) -> Error {
    crate::error::SyntaxError::new(msg, String::new(), 0).into()
}

fn reject_oversized(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if bytes.len() > MAXRDATAELEMSIZE {
        return Err(syntax("rdata field exceeds MAXRDATAELEMSIZE"));
    }
    Ok(bytes)
}

pub fn byte(tok: &str) -> Result<Vec<u8>> {
    let v: u8 = tok.parse().map_err(|_| syntax("invalid byte value"))?;
    Ok(vec![v])
}

pub fn short(tok: &str) -> Result<Vec<u8>> {
    let v: u16 = tok.parse().map_err(|_| syntax("invalid short value"))?;
    let mut out = Vec::with_capacity(2);
    out.write_u16::<BigEndian>(v).expect("Vec write cannot fail");
    Ok(out)
}

pub fn long(tok: &str) -> Result<Vec<u8>> {
    let v: u32 = tok.parse().map_err(|_| syntax("invalid long value"))?;
    let mut out = Vec::with_capacity(4);
    out.write_u32::<BigEndian>(v).expect("Vec write cannot fail");
    Ok(out)
}

pub fn ipv4(tok: &str) -> Result<Vec<u8>> {
    let addr: Ipv4Addr = tok.parse()?;
    Ok(addr.octets().to_vec())
}

pub fn ipv6(tok: &str) -> Result<Vec<u8>> {
    let addr: Ipv6Addr = tok.parse()?;
    Ok(addr.octets().to_vec())
}

/// Encodes `tok` as a wire-format domain name relative to `origin`.
pub fn dname(tok: &str, origin: &[u8]) -> Result<Vec<u8>> {
    crate::domain::encode_name(tok, origin)
}

/// Encodes `tok` as an RFC 1035 §3.3 `<character-string>`: one length
/// octet followed by up to 255 bytes.
pub fn text(tok: &str) -> Result<Vec<u8>> {
    if tok.len() > 255 {
        return Err(syntax("character-string longer than 255 bytes"));
    }
    let mut out = Vec::with_capacity(tok.len() + 1);
    out.push(tok.len() as u8);
    out.extend_from_slice(tok.as_bytes());
    Ok(out)
}

/// Consumes every remaining token, concatenating their decoded base64
/// bytes into one field.
pub fn base64_field(tokens: &[&str]) -> Result<Vec<u8>> {
    if tokens.is_empty() {
        return Err(syntax("base64 field has no tokens"));
    }
    let mut out = Vec::new();
    for tok in tokens {
        out.extend_from_slice(&b64::decode(tok)?);
    }
    reject_oversized(out)
}

/// Consumes every remaining token, re-joining them with single spaces and
/// parsing the result as an RFC 1876 LOC string.
pub fn loc_field(tokens: &[&str]) -> Result<Vec<u8>> {
    if tokens.is_empty() {
        return Err(syntax("LOC field has no tokens"));
    }
    let joined = tokens.join(" ");
    loc::parse_loc(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain;

    #[test]
    fn byte_rejects_trailing_garbage() {
        assert!(byte("12a").is_err());
        assert_eq!(byte("12").unwrap(), vec![12]);
    }

    #[test]
    fn short_is_big_endian() {
        assert_eq!(short("256").unwrap(), vec![1, 0]);
    }

    #[test]
    fn long_is_big_endian() {
        assert_eq!(long("1").unwrap(), vec![0, 0, 0, 1]);
    }

    #[test]
    fn ipv4_encodes_four_octets() {
        assert_eq!(ipv4("192.0.2.1").unwrap(), vec![192, 0, 2, 1]);
    }

    #[test]
    fn ipv4_rejects_invalid_address() {
        assert!(ipv4("not-an-ip").is_err());
    }

    #[test]
    fn ipv6_encodes_sixteen_octets() {
        let wire = ipv6("::1").unwrap();
        assert_eq!(wire, vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn dname_resolves_relative_to_origin() {
        let origin = domain::encode_name("example.com.", &domain::root()).unwrap();
        assert_eq!(
            dname("www", &origin).unwrap(),
            domain::encode_name("www.example.com.", &domain::root()).unwrap()
        );
    }

    #[test]
    fn text_rejects_strings_over_255_bytes() {
        assert!(text(&"a".repeat(256)).is_err());
        assert!(text(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn base64_field_concatenates_all_tokens() {
        let field = base64_field(&["aGVs", "bG8="]).unwrap();
        assert_eq!(field, b"hello");
    }
}
