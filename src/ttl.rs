//! TTL lexer (component C2): converts "1w2d3h"-style duration strings to a
//! number of seconds, the same grammar `strtottl()` in NSD's `zparser.c`
//! accepts.
//!
//! Each `[digits][unit]` group contributes `digits * multiplier`, where
//! `unit` is one of `s`/`m`/`h`/`d`/`w` (case-insensitive); a bare run of
//! digits with no unit is seconds. Groups accumulate; whitespace between
//! groups is skipped. Parsing stops at the first character that cannot
//! extend the current group, and the remainder of the string (starting at
//! that character) is handed back to the caller so it can detect trailing
//! garbage.

/// Parses a TTL duration string, returning the accumulated seconds and a
/// slice of `input` starting at the first unrecognized character (empty if
/// the whole string was consumed).
///
/// Negative values are accepted syntactically (a leading `-` or `+` sign is
/// honored, matching `strtottl()`); whether a negative TTL is semantically
/// valid is for the caller to decide.
pub fn parse_ttl(input: &str) -> (i64, &str) {
    let bytes = input.as_bytes();
    let mut sign: i64 = 1;
    let mut sign_seen = false;
    let mut group: i64 = 0;
    let mut seconds: i64 = 0;
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        match c {
            ' ' | '\t' => {}
            '-' if !sign_seen => {
                sign_seen = true;
                sign = -1;
            }
            '+' if !sign_seen => {
                sign_seen = true;
                sign = 1;
            }
            's' | 'S' => {
                seconds += group;
                group = 0;
            }
            'm' | 'M' => {
                seconds += group * 60;
                group = 0;
            }
            'h' | 'H' => {
                seconds += group * 3_600;
                group = 0;
            }
            'd' | 'D' => {
                seconds += group * 86_400;
                group = 0;
            }
            'w' | 'W' => {
                seconds += group * 604_800;
                group = 0;
            }
            '0'..='9' => {
                group = group * 10 + (c as i64 - '0' as i64);
            }
            _ => {
                seconds += group;
                return (sign * seconds, &input[i..]);
            }
        }
        i += 1;
    }

    seconds += group;
    (sign * seconds, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_seconds() {
        assert_eq!(parse_ttl("3600"), (3600, ""));
    }

    #[test]
    fn units_are_equivalent() {
        assert_eq!(parse_ttl("1w").0, 604_800);
        assert_eq!(parse_ttl("7d").0, 604_800);
        assert_eq!(parse_ttl("168h").0, 604_800);
        assert_eq!(parse_ttl("1w").0, parse_ttl("7d").0);
        assert_eq!(parse_ttl("7d").0, parse_ttl("168h").0);
    }

    #[test]
    fn mixed_groups() {
        assert_eq!(parse_ttl("1h30m").0, 5_400);
        assert_eq!(parse_ttl("2d12h").0, 2 * 86_400 + 12 * 3_600);
    }

    #[test]
    fn case_insensitive_units() {
        assert_eq!(parse_ttl("1W2D3H").0, parse_ttl("1w2d3h").0);
    }

    #[test]
    fn trailing_garbage_reported() {
        let (secs, rest) = parse_ttl("10x");
        assert_eq!(secs, 10);
        assert_eq!(rest, "x");
    }

    #[test]
    fn negative_sign_accepted_syntactically() {
        assert_eq!(parse_ttl("-10").0, -10);
        assert_eq!(parse_ttl("+10").0, 10);
    }

    #[test]
    fn whitespace_between_groups() {
        assert_eq!(parse_ttl("1h 30m").0, 5_400);
    }
}
