//! A dedicated error for all failures the zone-file parser can report: I/O,
//! malformed zone-file syntax, and the handful of hard resource limits that
//! would otherwise need an `unwrap()`.
use std::fmt::Display;
use std::net::AddrParseError;
use std::process::ExitCode;
use std::{fmt, io};

/// A specific custom `Result` for all functions in this crate.
pub type Result<T> = std::result::Result<T, self::Error>;

#[derive(Debug)]
pub enum Error {
    // failure opening or reading a zone file, or an $INCLUDE'd file
    Io(io::Error),

    // a dotted-quad or RFC4291 address token failed to parse
    IpParse(AddrParseError),

    // a record- or directive-level syntax problem; the session's error
    // counter is incremented and parsing resumes at the next logical record
    Syntax(SyntaxError),

    // a hard compile-time resource limit was violated (too many tokens,
    // too many rdata fields, LOC scratch buffer overrun): fatal to the
    // current session
    ResourceLimit(&'static str),

    // the CLI was invoked with an invalid usage
    Usage(String),
}

/// A record- or directive-level problem, carrying the file path and
/// physical line number at which it was detected.
#[derive(Debug)]
pub struct SyntaxError {
    pub message: String,
    pub file: String,
    pub line: u64,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, file: impl Into<String>, line: u64) -> Self {
        SyntaxError {
            message: message.into(),
            file: file.into(),
            line,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::IpParse(e) => write!(f, "invalid ip address: {}", e),
            Error::Syntax(e) => write!(f, "{} in {}, line {}", e.message, e.file, e.line),
            Error::ResourceLimit(what) => write!(f, "resource limit exceeded: {}", what),
            Error::Usage(msg) => write!(f, "usage error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for ExitCode {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(_) => ExitCode::from(1),
            Error::IpParse(_) => ExitCode::from(2),
            Error::Syntax(_) => ExitCode::from(3),
            Error::ResourceLimit(_) => ExitCode::from(4),
            Error::Usage(_) => ExitCode::from(64), // EX_USAGE
        }
    }
}

// all conversions for internal errors for Error
macro_rules! ErrFrom {
    ($err:path, $arm:path) => {
        impl From<$err> for Error {
            fn from(err: $err) -> Self {
                $arm(err)
            }
        }
    };
}

ErrFrom!(io::Error, Error::Io);
ErrFrom!(AddrParseError, Error::IpParse);
ErrFrom!(SyntaxError, Error::Syntax);
