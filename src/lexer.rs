//! Line tokenizer (component C5): splits one logical record, possibly
//! spanning several physical lines inside parentheses, into an ordered
//! token list.
//!
//! Grounded on `zparseline()` in NSD's `zparser.c`: the same delimiter set
//! (space/tab/newline), the same `"..."` quoting, the same `;`
//! end-of-line comment, and the same parenthesis continuation rule. Unlike
//! the original, which re-tokenizes each physical line into a buffer it
//! overwrites on the next `fgets`, this accumulates every physical line of
//! the logical record into one owned buffer first and tokenizes it in a
//! single pass, so every returned token stays valid for the lifetime of
//! that buffer rather than only until the next physical line is read.
use std::io::BufRead;

use crate::error::{Error, Result};

/// Maximum accumulated length of one logical record's source text.
pub const ZBUFSIZE: usize = 8192;
/// Maximum number of tokens in one logical record.
pub const MAXTOKENSLEN: usize = 768;

/// One token of a logical record. [`Token::SameOwner`] is the synthetic
/// token a line beginning with whitespace produces, signalling "reuse the
/// previous record's owner name".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    SameOwner,
    Word(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_word(self) -> Option<&'a str> {
        match self {
            Token::Word(w) => Some(w),
            Token::SameOwner => None,
        }
    }
}

/// Reads and tokenizes the next logical record from `reader` into `buf`
/// (cleared first), advancing `line_no` by the number of physical lines
/// consumed.
///
/// Returns `Ok(None)` at a clean end of file. Returns `Ok(Some(tokens))`
/// with a non-empty token list for every successfully parsed logical
/// record; logical records with no tokens (blank lines, comment-only
/// lines) are skipped internally and never returned. Returns `Err` on a
/// lexical fatal: unterminated quote, mismatched parentheses, a truncated
/// line, or an I/O failure.
pub fn read_logical_record<'b>(
    reader: &mut dyn BufRead,
    buf: &'b mut String,
    line_no: &mut u64,
) -> Result<Option<Vec<Token<'b>>>> {
    loop {
        buf.clear();
        let mut depth = 0i32;

        loop {
            let before = buf.len();
            let n = reader.read_line(buf)?;
            if n == 0 {
                if depth > 0 {
                    return Err(fatal("unexpected end of file inside parentheses"));
                }
                if before == 0 {
                    return Ok(None);
                }
                break;
            }
            *line_no += 1;

            if buf.len() > ZBUFSIZE {
                return Err(fatal("truncated line, possibly insufficient buffer size"));
            }

            let had_newline = buf[before..].ends_with('\n');
            scan_parens(&buf[before..], &mut depth)?;

            if !had_newline {
                return Err(fatal("truncated line, possibly insufficient buffer size"));
            }
            if depth == 0 {
                break;
            }
        }

        let tokens = tokenize(buf)?;
        if !tokens.is_empty() {
            return Ok(Some(tokens));
        }
        // empty logical record (blank line, comment-only): keep reading
    }
}

/// Updates the running parenthesis depth for one physical line, outside
/// of quoted strings, and rejects nesting / stray closers.
fn scan_parens(line: &str, depth: &mut i32) -> Result<()> {
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => break,
            '(' if !in_quotes => {
                if *depth > 0 {
                    return Err(fatal("nested parentheses"));
                }
                *depth += 1;
            }
            ')' if !in_quotes => {
                if *depth == 0 {
                    return Err(fatal("missing opening parenthesis"));
                }
                *depth -= 1;
            }
            _ => {}
        }
    }
    Ok(())
}

/// Tokenizes the full (possibly multi-physical-line) text of one logical
/// record.
fn tokenize(text: &str) -> Result<Vec<Token<'_>>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    // Leading whitespace on the record's very first physical line (i.e.
    // outside any parentheses) means "reuse the previous owner". Only the
    // first byte is consumed as the marker, matching zparseline(); the
    // remaining run of whitespace falls through to the ordinary
    // delimiter-skipping below.
    if !bytes.is_empty() && matches!(bytes[0], b' ' | b'\t') {
        tokens.push(Token::SameOwner);
        push_token_bound(&mut tokens)?;
        i = 1;
    }

    while i < bytes.len() {
        // skip delimiters
        while i < bytes.len() && matches!(bytes[i], b' ' | b'\t' | b'\n') {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        if bytes[i] == b';' {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }

        if bytes[i] == b'(' || bytes[i] == b')' {
            // already validated by scan_parens; just skip the marker byte
            i += 1;
            continue;
        }

        if bytes[i] == b'"' {
            let start = i + 1;
            let mut j = start;
            while j < bytes.len() && bytes[j] != b'"' {
                j += 1;
            }
            if j >= bytes.len() {
                return Err(fatal("unterminated quoted string"));
            }
            tokens.push(Token::Word(&text[start..j]));
            push_token_bound(&mut tokens)?;
            i = j + 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && !matches!(bytes[i], b' ' | b'\t' | b'\n' | b';' | b'"') {
            i += 1;
        }
        tokens.push(Token::Word(&text[start..i]));
        push_token_bound(&mut tokens)?;
    }

    Ok(tokens)
}

fn push_token_bound(tokens: &mut [Token<'_>]) -> Result<()> {
    if tokens.len() > MAXTOKENSLEN {
        return Err(Error::ResourceLimit("too many tokens per entry"));
    }
    Ok(())
}

fn fatal(msg: &str) -> Error {
    crate::error::SyntaxError::new(msg, String::new(), 0).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(input: &str) -> Vec<String> {
        let mut reader = Cursor::new(input.as_bytes());
        let mut buf = String::new();
        let mut line_no = 0u64;
        let tokens = read_logical_record(&mut reader, &mut buf, &mut line_no)
            .unwrap()
            .unwrap();
        tokens
            .into_iter()
            .map(|t| match t {
                Token::SameOwner => " ".to_string(),
                Token::Word(w) => w.to_string(),
            })
            .collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            record("example.com. 3600 IN A 192.0.2.1\n"),
            vec!["example.com.", "3600", "IN", "A", "192.0.2.1"]
        );
    }

    #[test]
    fn leading_whitespace_is_same_owner_token() {
        assert_eq!(record("  IN A 10.0.0.1\n"), vec![" ", "IN", "A", "10.0.0.1"]);
    }

    #[test]
    fn quoted_string_is_one_token() {
        assert_eq!(
            record("t TXT \"hello; world (x)\"\n"),
            vec!["t", "TXT", "hello; world (x)"]
        );
    }

    #[test]
    fn comment_is_stripped() {
        assert_eq!(record("a A 1.2.3.4 ; a comment\n"), vec!["a", "A", "1.2.3.4"]);
    }

    #[test]
    fn parens_allow_continuation_across_lines() {
        assert_eq!(
            record("foo IN SOA ns root (\n  1 2 3 4 5 )\n"),
            vec!["foo", "IN", "SOA", "ns", "root", "1", "2", "3", "4", "5"]
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut reader = Cursor::new(b"\n\n; just a comment\na A 1.2.3.4\n".as_slice());
        let mut buf = String::new();
        let mut line_no = 0u64;
        let tokens = read_logical_record(&mut reader, &mut buf, &mut line_no)
            .unwrap()
            .unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(line_no, 4);
    }

    #[test]
    fn nested_parens_are_rejected() {
        let mut reader = Cursor::new(b"a IN SOA ns root ( (1 2 3 4 5) )\n".as_slice());
        let mut buf = String::new();
        let mut line_no = 0u64;
        assert!(read_logical_record(&mut reader, &mut buf, &mut line_no).is_err());
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        let mut reader = Cursor::new(b"t TXT \"unterminated\n".as_slice());
        let mut buf = String::new();
        let mut line_no = 0u64;
        assert!(read_logical_record(&mut reader, &mut buf, &mut line_no).is_err());
    }

    #[test]
    fn unbalanced_paren_at_eof_is_rejected() {
        let mut reader = Cursor::new(b"a IN SOA ns root (\n 1 2 3 4 5\n".as_slice());
        let mut buf = String::new();
        let mut line_no = 0u64;
        assert!(read_logical_record(&mut reader, &mut buf, &mut line_no).is_err());
    }

    #[test]
    fn clean_eof_returns_none() {
        let mut reader = Cursor::new(b"".as_slice());
        let mut buf = String::new();
        let mut line_no = 0u64;
        assert!(read_logical_record(&mut reader, &mut buf, &mut line_no)
            .unwrap()
            .is_none());
    }
}
