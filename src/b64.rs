//! Base64 RDATA decoding (component C4), used by the KEY/SIG/CERT-family
//! assemblers for their key-material fields.
//!
//! Grounded on `dns::rfc::openpgpkey::OpenPGPKey`, which stores its RDATA as
//! a base64-encoded blob on the wire and decodes it with
//! `base64::engine::general_purpose::STANDARD`.
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Error, Result};

/// Decodes a base64 token (standard alphabet, with padding) into raw bytes.
pub fn decode(token: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(token)
        .map_err(|e| syntax(&format!("invalid base64: {e}")))
}

fn syntax(msg: &str) -> Error {
    crate::error::SyntaxError::new(msg, String::new(), 0).into()
}
