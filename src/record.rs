//! The decoded resource record (component of the §3 data model).
//!
//! Grounded on `dns::rfc::resource_record::ResourceRecord`'s owner/type/
//! class/ttl/rdata shape, but RDATA here is the tagged sequence of
//! length-prefixed fields this crate's C7 assemblers produce rather than
//! a single opaque `RData` enum payload -- this crate hands its caller
//! fields ready to concatenate into on-wire RDATA, not a decoded Rust
//! value.
use byteorder::{BigEndian, WriteBytesExt};

/// One length-prefixed RDATA field: a 16-bit length followed by that many
/// bytes, per §3's field-encoding invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdataField(pub Vec<u8>);

impl RdataField {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends this field's 16-bit length prefix and its bytes to `out`.
    pub fn write_framed(&self, out: &mut Vec<u8>) {
        out.write_u16::<BigEndian>(self.0.len() as u16)
            .expect("Vec write cannot fail");
        out.extend_from_slice(&self.0);
    }
}

/// A single parsed resource record, fully owned: the caller may retain it
/// only until the next call to [`crate::session::Session::next_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub owner: Vec<u8>,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub fields: Vec<RdataField>,
}

impl Record {
    pub fn new(owner: Vec<u8>, rtype: u16, class: u16, ttl: u32, fields: Vec<Vec<u8>>) -> Self {
        Record {
            owner,
            rtype,
            class,
            ttl,
            fields: fields.into_iter().map(RdataField).collect(),
        }
    }

    /// Sum of this record's field lengths: the RDLENGTH it would carry on
    /// the wire.
    pub fn rdlength(&self) -> usize {
        self.fields.iter().map(RdataField::len).sum()
    }

    /// Concatenates every field's 16-bit-length-prefixed wire form, in
    /// order.
    pub fn write_rdata(&self, out: &mut Vec<u8>) {
        for field in &self.fields {
            field.write_framed(out);
        }
    }
}
