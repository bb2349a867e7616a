//! A streaming parser for DNS master zone files (RFC 1035 §5 and its
//! extensions RFC 1876, RFC 2782, RFC 2915, RFC 3403 and RFC 3596).
//!
//! [`Session`] opens a zone file and, via repeated calls to
//! [`Session::next_record`], yields an ordered sequence of [`Record`]s
//! whose RDATA is already in wire-format byte fields, ready for loading
//! into an authoritative name server's in-memory zone. The crate does no
//! zone-semantic validation (no SOA-at-apex check, no glue resolution, no
//! DNSSEC verification), no text re-emission, and no network I/O.
//!
//! ```no_run
//! use zonefile::Session;
//!
//! let mut session = Session::open("example.com.zone", 3600, zonefile::name::CLASS_IN, ".")?;
//! while let Some(record) = session.next_record()? {
//!     println!("{:?} type {} ttl {}", record.owner, record.rtype, record.ttl);
//! }
//! assert_eq!(session.errors(), 0, "zone file had parse errors");
//! # Ok::<(), zonefile::error::Error>(())
//! ```
pub mod b64;
pub mod domain;
pub mod error;
pub mod lexer;
pub mod loc;
pub mod name;
pub mod rdata;
pub mod record;
pub mod resolver;
pub mod session;
pub mod ttl;

pub use error::{Error, Result};
pub use record::{Record, RdataField};
pub use session::Session;
