//! Static name tables for RR classes and types (component C1).
//!
//! Mirrors `ztypes`/`zclasses` and `intbyname()` in NSD's `zparser.c`: a
//! case-insensitive exact-match lookup from a textual mnemonic to its
//! 16-bit numeric code, returning `None` on a miss. Numeric codes are taken
//! from the IANA assignments also reproduced in `dns::rfc::qtype::QType`.

/// Known RR classes, RFC 1035 §3.2.4.
const CLASSES: &[(&str, u16)] = &[
    ("IN", 1),
    ("CS", 2),
    ("CH", 3),
    ("HS", 4),
    ("ANY", 255),
];

/// Known RR types. A handful (KEY, NXT, DS, WKS) resolve to a numeric code
/// here but have no RDATA assembler in [`crate::rdata`] — per the original
/// zparser.c's `default:` case they are recognized names with unsupported
/// RDATA, not unknown names.
const TYPES: &[(&str, u16)] = &[
    ("A", 1),
    ("NS", 2),
    ("MD", 3),
    ("MF", 4),
    ("CNAME", 5),
    ("SOA", 6),
    ("MB", 7),
    ("MG", 8),
    ("MR", 9),
    ("NULL", 10),
    ("WKS", 11),
    ("PTR", 12),
    ("HINFO", 13),
    ("MINFO", 14),
    ("MX", 15),
    ("TXT", 16),
    ("RP", 17),
    ("AFSDB", 18),
    ("X25", 19),
    ("ISDN", 20),
    ("RT", 21),
    ("SIG", 24),
    ("KEY", 25),
    ("AAAA", 28),
    ("LOC", 29),
    ("NXT", 30),
    ("SRV", 33),
    ("NAPTR", 35),
    ("KX", 36),
    ("CERT", 37),
    ("DNAME", 39),
    ("DS", 43),
];

/// Type code for the `TYPExxx` (RFC 3597) escape prefix.
const TYPE_ESCAPE_PREFIX: &str = "TYPE";

fn lookup(table: &[(&str, u16)], name: &str) -> Option<u16> {
    table
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}

/// Looks up a class mnemonic, case-insensitively. Returns `None` on a miss
/// (the caller treats a missing class as "not a class token" rather than an
/// error, since the header resolver falls back to the session default).
pub fn lookup_class(name: &str) -> Option<u16> {
    lookup(CLASSES, name)
}

/// Looks up a type mnemonic, case-insensitively, also accepting the
/// `TYPExxx` RFC 3597 escape where `xxx` is a decimal code. Returns `None`
/// if neither form matches.
pub fn lookup_type(name: &str) -> Option<u16> {
    if let Some(code) = lookup(TYPES, name) {
        return Some(code);
    }

    if name.len() > TYPE_ESCAPE_PREFIX.len()
        && name[..TYPE_ESCAPE_PREFIX.len()].eq_ignore_ascii_case(TYPE_ESCAPE_PREFIX)
    {
        return name[TYPE_ESCAPE_PREFIX.len()..].parse::<u16>().ok();
    }

    None
}

/// Numeric constants for the types the RDATA dispatcher (C7) knows how to
/// assemble, named the way `dns::rfc::qtype::QType` names them.
pub mod rtype {
    pub const A: u16 = 1;
    pub const NS: u16 = 2;
    pub const MD: u16 = 3;
    pub const MF: u16 = 4;
    pub const CNAME: u16 = 5;
    pub const SOA: u16 = 6;
    pub const MB: u16 = 7;
    pub const MG: u16 = 8;
    pub const MR: u16 = 9;
    pub const NULL: u16 = 10;
    pub const PTR: u16 = 12;
    pub const HINFO: u16 = 13;
    pub const MINFO: u16 = 14;
    pub const MX: u16 = 15;
    pub const TXT: u16 = 16;
    pub const RP: u16 = 17;
    pub const AFSDB: u16 = 18;
    pub const SIG: u16 = 24;
    pub const AAAA: u16 = 28;
    pub const LOC: u16 = 29;
    pub const SRV: u16 = 33;
    pub const NAPTR: u16 = 35;
}

/// Class constant used as the default session class in tests and the CLI.
pub const CLASS_IN: u16 = 1;
