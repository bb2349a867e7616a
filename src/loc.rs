//! RFC 1876 LOC record decoder (component C4): converts the textual
//! `d1 [m1 [s1]] {"N"|"S"} d2 [m2 [s2]] {"E"|"W"} alt["m"] [siz["m"]
//! [hp["m"] [vp["m"]]]]` syntax into the 16-byte wire-format RDATA.
//!
//! No file in the retrieved corpus implements `loc_aton`; this is built
//! directly from RFC 1876 Appendix A's reference algorithm, in the style
//! the other primitive decoders in this crate use. Unlike the reference
//! C implementation's unbounded scratch buffer, the token list handed in
//! here is already bounded by the tokenizer's MAXTOKENSLEN.
use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{Error, Result};

/// Wire length of a LOC record's RDATA.
pub const LOCRDLEN: usize = 16;

const BIAS: i64 = 1 << 31;
const POWER_OF_TEN: [i64; 10] = [
    1, 10, 100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000, 100_000_000, 1_000_000_000,
];

const DEFAULT_SIZE_CM: i64 = 100; // 1m
const DEFAULT_HORIZ_PRE_CM: i64 = 1_000_000; // 10000m
const DEFAULT_VERT_PRE_CM: i64 = 1_000; // 10m

/// Parses the space-joined remainder of a LOC record's tokens into its
/// 16-byte wire-format RDATA.
pub fn parse_loc(text: &str) -> Result<Vec<u8>> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut pos = 0usize;

    let latitude = parse_angle(&tokens, &mut pos, 'N', 'S')?;
    let longitude = parse_angle(&tokens, &mut pos, 'E', 'W')?;
    let altitude = parse_altitude(next_token(&tokens, &mut pos)?)?;

    let size = match next_token(&tokens, &mut pos) {
        Ok(t) => parse_precision(t)?,
        Err(_) => DEFAULT_SIZE_CM,
    };
    let horiz_pre = match next_token(&tokens, &mut pos) {
        Ok(t) => parse_precision(t)?,
        Err(_) => DEFAULT_HORIZ_PRE_CM,
    };
    let vert_pre = match next_token(&tokens, &mut pos) {
        Ok(t) => parse_precision(t)?,
        Err(_) => DEFAULT_VERT_PRE_CM,
    };

    if pos != tokens.len() {
        return Err(syntax("trailing garbage in LOC record"));
    }

    let mut wire = Vec::with_capacity(LOCRDLEN);
    wire.push(0u8); // VERSION
    wire.push(encode_precision(size));
    wire.push(encode_precision(horiz_pre));
    wire.push(encode_precision(vert_pre));
    wire.write_u32::<BigEndian>(latitude as u32)
        .expect("writing to a Vec cannot fail");
    wire.write_u32::<BigEndian>(longitude as u32)
        .expect("writing to a Vec cannot fail");
    wire.write_u32::<BigEndian>(altitude as u32)
        .expect("writing to a Vec cannot fail");

    Ok(wire)
}

fn next_token<'a>(tokens: &[&'a str], pos: &mut usize) -> Result<&'a str> {
    let tok = tokens
        .get(*pos)
        .ok_or_else(|| syntax("LOC record ended early"))?;
    *pos += 1;
    Ok(tok)
}

/// Parses one `d [m [s]] dir` sequence (latitude or longitude) into its
/// biased 32-bit wire value.
fn parse_angle(tokens: &[&str], pos: &mut usize, positive: char, negative: char) -> Result<i64> {
    let deg: i64 = next_token(tokens, pos)?
        .parse()
        .map_err(|_| syntax("invalid LOC degrees"))?;

    let mut min: i64 = 0;
    let mut sec: f64 = 0.0;

    if let Some(tok) = tokens.get(*pos) {
        if is_numeric_component(tok) {
            min = tok.parse().map_err(|_| syntax("invalid LOC minutes"))?;
            *pos += 1;

            if let Some(tok) = tokens.get(*pos) {
                if is_numeric_component(tok) {
                    sec = tok.parse().map_err(|_| syntax("invalid LOC seconds"))?;
                    *pos += 1;
                }
            }
        }
    }

    let dir = next_token(tokens, pos)?;
    let mut chars = dir.chars();
    let dir_char = chars
        .next()
        .filter(|_| chars.next().is_none())
        .ok_or_else(|| syntax("invalid LOC direction"))?
        .to_ascii_uppercase();

    let milliseconds = ((deg * 60 + min) * 60) as f64 * 1000.0 + sec * 1000.0;
    let milliseconds = milliseconds.round() as i64;

    if dir_char == positive.to_ascii_uppercase() {
        Ok(BIAS + milliseconds)
    } else if dir_char == negative.to_ascii_uppercase() {
        Ok(BIAS - milliseconds)
    } else {
        Err(syntax("invalid LOC direction"))
    }
}

fn is_numeric_component(tok: &str) -> bool {
    tok.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Parses an altitude token (decimal meters, optional trailing `m`,
/// optionally signed) into its biased 32-bit wire value.
fn parse_altitude(tok: &str) -> Result<i64> {
    let meters = strip_meter_suffix(tok)
        .parse::<f64>()
        .map_err(|_| syntax("invalid LOC altitude"))?;
    let centimeters = (meters * 100.0).round() as i64;
    let value = centimeters + 10_000_000;
    if !(0..=u32::MAX as i64).contains(&value) {
        return Err(syntax("LOC altitude out of range"));
    }
    Ok(value)
}

/// Parses a size/precision token (decimal meters, optional trailing `m`)
/// into centimeters.
fn parse_precision(tok: &str) -> Result<i64> {
    let meters = strip_meter_suffix(tok)
        .parse::<f64>()
        .map_err(|_| syntax("invalid LOC size/precision"))?;
    if meters < 0.0 {
        return Err(syntax("LOC size/precision cannot be negative"));
    }
    Ok((meters * 100.0).round() as i64)
}

fn strip_meter_suffix(tok: &str) -> &str {
    tok.strip_suffix(['m', 'M']).unwrap_or(tok)
}

/// Encodes a centimeter value as the `(mantissa << 4) | exponent` byte
/// RFC 1876 uses for SIZE, HORIZ PRE and VERT PRE.
fn encode_precision(centimeters: i64) -> u8 {
    let mut exponent = 0usize;
    while exponent < 9 && centimeters >= POWER_OF_TEN[exponent + 1] {
        exponent += 1;
    }
    let mantissa = (centimeters / POWER_OF_TEN[exponent]).min(9);
    ((mantissa << 4) | exponent as i64) as u8
}

fn syntax(msg: &str) -> Error {
    crate::error::SyntaxError::new(msg, String::new(), 0).into()
}
