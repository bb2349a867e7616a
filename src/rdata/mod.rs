//! RDATA dispatch and per-type assemblers (component C7).
//!
//! Grounded on `zrdata()`'s per-type `switch` in `zparser.c` for the
//! dispatch and on `dns/src/rfc/rdata.rs`'s tagged-union `RData` enum for
//! the shape: rather than hand-writing one assembler function per type
//! with its own ad hoc field count (the bug class called out as the
//! reason for a tagged-union re-architecture), each type is a declarative
//! [`Recipe`] of primitives, and a single loop drives all of them. An
//! assembler that fails discards any fields already produced for that
//! record, same as `zread()`'s rollback on a `zrdata()` failure.
pub mod primitives;

use crate::error::{Error, Result};
use crate::lexer::Token;
use crate::name::rtype;

/// Maximum number of RDATA fields in one record (MAXRDATALEN).
pub const MAXRDATALEN: usize = 64;
/// Maximum total RDATA bytes across all of a record's fields.
pub const MAXRDLENGTH: usize = 65_535;

/// One step of a type's recipe: a primitive that consumes exactly one
/// token, or one of the two greedy primitives that consume every
/// remaining token.
#[derive(Clone, Copy)]
enum Step {
    Byte,
    Short,
    Long,
    Ipv4,
    Ipv6,
    Dname,
    Text,
    TextGreedy,
    Base64,
    Loc,
}

fn recipe(rtype: u16) -> Option<&'static [Step]> {
    use Step::*;
    Some(match rtype {
        rtype::A => &[Ipv4],
        rtype::NS | rtype::MD | rtype::MF | rtype::CNAME | rtype::MB | rtype::MG | rtype::MR
        | rtype::PTR => &[Dname],
        rtype::MINFO | rtype::RP => &[Dname, Dname],
        rtype::MX | rtype::AFSDB => &[Short, Dname],
        rtype::SOA => &[Dname, Dname, Long, Long, Long, Long, Long],
        rtype::TXT => &[TextGreedy],
        rtype::HINFO => &[Text, Text],
        rtype::AAAA => &[Ipv6],
        rtype::SRV => &[Short, Short, Short, Dname],
        rtype::NAPTR => &[Short, Short, Text, Text, Text, Dname],
        rtype::SIG => &[Short, Byte, Byte, Long, Long, Long, Short, Dname, Base64],
        rtype::LOC => &[Loc],
        rtype::NULL => &[],
        _ => return None,
    })
}

/// Assembles the ordered RDATA fields for `rtype` from `tokens`, relative
/// to `origin`. `tokens` must already have had its owner/ttl/class/type
/// header tokens stripped (see [`crate::resolver::resolve_header`]).
pub fn assemble(rtype: u16, tokens: &[Token<'_>], origin: &[u8]) -> Result<Vec<Vec<u8>>> {
    let steps = recipe(rtype).ok_or_else(|| syntax("don't know how to parse this type"))?;

    if steps.is_empty() {
        return Ok(Vec::new());
    }

    let mut fields = Vec::with_capacity(steps.len());
    let mut idx = 0usize;

    for (i, step) in steps.iter().enumerate() {
        let is_last = i == steps.len() - 1;
        let field = match step {
            Step::Byte => {
                primitives::byte(next_token(tokens, &mut idx, "byte")?)
            }
            Step::Short => primitives::short(next_token(tokens, &mut idx, "short")?),
            Step::Long => primitives::long(next_token(tokens, &mut idx, "long")?),
            Step::Ipv4 => primitives::ipv4(next_token(tokens, &mut idx, "ipv4 address")?),
            Step::Ipv6 => primitives::ipv6(next_token(tokens, &mut idx, "ipv6 address")?),
            Step::Dname => primitives::dname(next_token(tokens, &mut idx, "domain name")?, origin),
            Step::Text => primitives::text(next_token(tokens, &mut idx, "character-string")?),
            Step::TextGreedy => {
                debug_assert!(is_last);
                let rest = remaining_words(tokens, idx)?;
                if rest.is_empty() {
                    return Err(syntax("TXT record has no character-strings"));
                }
                for word in &rest {
                    fields.push(primitives::text(word)?);
                }
                idx = tokens.len();
                continue;
            }
            Step::Base64 => {
                debug_assert!(is_last);
                let rest = remaining_words(tokens, idx)?;
                let field = primitives::base64_field(&rest);
                idx = tokens.len();
                field
            }
            Step::Loc => {
                debug_assert!(is_last);
                let rest = remaining_words(tokens, idx)?;
                let field = primitives::loc_field(&rest);
                idx = tokens.len();
                field
            }
        }?;
        fields.push(field);

        if fields.len() > MAXRDATALEN {
            return Err(Error::ResourceLimit("too many rdata fields"));
        }
    }

    if idx != tokens.len() {
        return Err(syntax("trailing garbage in rdata"));
    }

    let total: usize = fields.iter().map(Vec::len).sum();
    if total > MAXRDLENGTH {
        return Err(syntax("rdata exceeds maximum record length"));
    }

    Ok(fields)
}

fn next_token<'a>(tokens: &[Token<'a>], idx: &mut usize, what: &str) -> Result<&'a str> {
    let word = tokens
        .get(*idx)
        .and_then(|t| t.as_word())
        .ok_or_else(|| syntax(format!("missing {what}")))?;
    *idx += 1;
    Ok(word)
}

fn remaining_words<'a>(tokens: &[Token<'a>], from: usize) -> Result<Vec<&'a str>> {
    tokens[from..]
        .iter()
        .map(|t| t.as_word().ok_or_else(|| syntax("unexpected token in rdata")))
        .collect()
}

fn syntax(msg: impl Into<String>) -> Error {
    crate::error::SyntaxError::new(msg, String::new(), 0).into()
}
