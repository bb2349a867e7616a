//! Directive and record-header resolver (component C6).
//!
//! Grounded on `zread()` in NSD's `zparser.c`: the `$`-prefixed directive
//! dispatch, the synthetic-leading-space owner rule, and the loop that
//! scans the tokens between the owner and the RDATA for an (any-order,
//! each-at-most-once) TTL, class and type. This module holds no state of
//! its own; the session owns the origin/TTL/class defaults and the
//! previous owner, and decides what to do with a [`DirectiveOutcome`] or
//! [`RecordHeader`] this module returns.
use crate::error::{Error, Result};
use crate::lexer::Token;
use crate::name::{self, rtype};
use crate::ttl;

/// The effect of a `$TTL` / `$ORIGIN` / `$INCLUDE` directive line.
pub enum DirectiveOutcome {
    Ttl(i64),
    /// Already encoded relative to the origin in effect when the
    /// directive was read.
    Origin(Vec<u8>),
    Include {
        file: String,
        /// `None` means "reuse the current origin".
        origin: Option<Vec<u8>>,
    },
}

/// The resolved owner/TTL/class/type header of a record line, plus the
/// index into the token list at which RDATA begins.
pub struct RecordHeader {
    pub owner: Vec<u8>,
    pub ttl: i64,
    pub class: u16,
    pub rtype: u16,
    pub rdata_start: usize,
}

/// `true` if `tokens[0]` opens a `$` directive line.
pub fn is_directive(tokens: &[Token<'_>]) -> bool {
    matches!(tokens.first(), Some(Token::Word(w)) if w.starts_with('$'))
}

/// Resolves a `$TTL` / `$ORIGIN` / `$INCLUDE` line. `origin` is the
/// session's current origin, used to encode a relative `$ORIGIN` or
/// `$INCLUDE` origin argument.
pub fn resolve_directive(tokens: &[Token<'_>], origin: &[u8]) -> Result<DirectiveOutcome> {
    let directive = tokens[0].as_word().expect("checked by is_directive");
    let arg = |i: usize| -> Result<&str> {
        tokens
            .get(i)
            .and_then(|t| t.as_word())
            .ok_or_else(|| syntax("missing directive argument"))
    };

    if directive.eq_ignore_ascii_case("$TTL") {
        let (value, rest) = ttl::parse_ttl(arg(1)?);
        if !rest.is_empty() {
            return Err(syntax("invalid $TTL value"));
        }
        Ok(DirectiveOutcome::Ttl(value))
    } else if directive.eq_ignore_ascii_case("$ORIGIN") {
        let wire = crate::domain::encode_name(arg(1)?, origin)?;
        Ok(DirectiveOutcome::Origin(wire))
    } else if directive.eq_ignore_ascii_case("$INCLUDE") {
        let file = arg(1)?.to_string();
        let origin = match tokens.get(2).and_then(|t| t.as_word()) {
            Some(name) => Some(crate::domain::encode_name(name, origin)?),
            None => None,
        };
        Ok(DirectiveOutcome::Include { file, origin })
    } else {
        Err(syntax("unknown directive"))
    }
}

/// Resolves the owner name for a record line: `tokens[0]`, which is
/// either a real name token or the synthetic same-owner marker.
pub fn resolve_owner(
    tokens: &[Token<'_>],
    origin: &[u8],
    prev_owner: Option<&[u8]>,
) -> Result<Vec<u8>> {
    match tokens[0] {
        Token::SameOwner => prev_owner
            .map(|o| o.to_vec())
            .ok_or_else(|| syntax("missing domain name")),
        Token::Word(w) => crate::domain::encode_name(w, origin),
    }
}

/// Scans the tokens following the owner for TTL, class and type, in any
/// order, each at most once, then returns the resolved header and the
/// index of the first RDATA token.
pub fn resolve_header(
    tokens: &[Token<'_>],
    origin: &[u8],
    default_ttl: i64,
    default_class: u16,
    prev_owner: Option<&[u8]>,
) -> Result<RecordHeader> {
    let owner = resolve_owner(tokens, origin, prev_owner)?;

    let mut ttl = default_ttl;
    let mut class = default_class;
    let mut found_type = None;
    let mut idx = 1;

    while idx < tokens.len() {
        let word = tokens[idx]
            .as_word()
            .ok_or_else(|| syntax("unexpected token in record header"))?;

        if word.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            let (value, rest) = ttl::parse_ttl(word);
            if !rest.is_empty() {
                return Err(syntax("missing or unrecognized type"));
            }
            ttl = value;
            idx += 1;
            continue;
        }

        if let Some(c) = name::lookup_class(word) {
            class = c;
            idx += 1;
            continue;
        }

        found_type = name::lookup_type(word);
        idx += 1;
        break;
    }

    let rtype = found_type.ok_or_else(|| syntax("missing or unrecognized type"))?;

    if rtype == rtype::NULL {
        if idx != tokens.len() {
            return Err(syntax("NULL record must not have rdata"));
        }
    } else if idx >= tokens.len() {
        return Err(syntax("record has no rdata"));
    }

    Ok(RecordHeader {
        owner,
        ttl,
        class,
        rtype,
        rdata_start: idx,
    })
}

fn syntax(msg: &str) -> Error {
    crate::error::SyntaxError::new(msg, String::new(), 0).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain;

    fn words<'a>(words: &[&'a str]) -> Vec<Token<'a>> {
        words.iter().map(|w| Token::Word(w)).collect()
    }

    #[test]
    fn recognizes_directives() {
        assert!(is_directive(&words(&["$TTL", "3600"])));
        assert!(!is_directive(&words(&["example.com.", "A", "1.2.3.4"])));
    }

    #[test]
    fn ttl_directive() {
        let origin = domain::root();
        match resolve_directive(&words(&["$TTL", "1h"]), &origin).unwrap() {
            DirectiveOutcome::Ttl(v) => assert_eq!(v, 3600),
            _ => panic!("expected Ttl"),
        }
    }

    #[test]
    fn origin_directive_is_relative_to_current_origin() {
        let origin = domain::encode_name("example.com.", &domain::root()).unwrap();
        match resolve_directive(&words(&["$ORIGIN", "sub"]), &origin).unwrap() {
            DirectiveOutcome::Origin(wire) => {
                assert_eq!(wire, domain::encode_name("sub.example.com.", &domain::root()).unwrap());
            }
            _ => panic!("expected Origin"),
        }
    }

    #[test]
    fn include_directive_without_origin_override() {
        let origin = domain::root();
        match resolve_directive(&words(&["$INCLUDE", "more.zone"]), &origin).unwrap() {
            DirectiveOutcome::Include { file, origin } => {
                assert_eq!(file, "more.zone");
                assert!(origin.is_none());
            }
            _ => panic!("expected Include"),
        }
    }

    #[test]
    fn unknown_directive_is_an_error() {
        let origin = domain::root();
        assert!(resolve_directive(&words(&["$BOGUS"]), &origin).is_err());
    }

    #[test]
    fn header_scans_ttl_class_type_in_any_order() {
        let origin = domain::root();
        let tokens = words(&["example.com.", "IN", "3600", "A"]);
        let header = resolve_header(&tokens, &origin, 300, 1, None).unwrap();
        assert_eq!(header.ttl, 3600);
        assert_eq!(header.class, 1);
        assert_eq!(header.rtype, rtype::A);
    }

    #[test]
    fn header_applies_defaults_when_ttl_and_class_absent() {
        let origin = domain::root();
        let tokens = words(&["example.com.", "A"]);
        let header = resolve_header(&tokens, &origin, 300, 1, None).unwrap();
        assert_eq!(header.ttl, 300);
        assert_eq!(header.class, 1);
    }

    #[test]
    fn same_owner_requires_previous_owner() {
        let origin = domain::root();
        let tokens = vec![Token::SameOwner, Token::Word("A"), Token::Word("1.2.3.4")];
        assert!(resolve_header(&tokens, &origin, 300, 1, None).is_err());
        let prev = domain::encode_name("example.com.", &origin).unwrap();
        assert!(resolve_header(&tokens, &origin, 300, 1, Some(&prev)).is_ok());
    }

    #[test]
    fn null_type_requires_empty_rdata() {
        let origin = domain::root();
        let tokens = words(&["example.com.", "NULL"]);
        let header = resolve_header(&tokens, &origin, 300, 1, None).unwrap();
        assert_eq!(header.rdata_start, tokens.len());

        let tokens = words(&["example.com.", "NULL", "garbage"]);
        assert!(resolve_header(&tokens, &origin, 300, 1, None).is_err());
    }

    #[test]
    fn missing_type_is_an_error() {
        let origin = domain::root();
        let tokens = words(&["example.com.", "3600", "IN"]);
        assert!(resolve_header(&tokens, &origin, 300, 1, None).is_err());
    }
}
