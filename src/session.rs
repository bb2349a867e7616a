//! Parser session (component C8): owns the open file, buffers, counters,
//! current defaults, the `$INCLUDE` chain, and the last-produced record.
//!
//! Grounded on `struct zparser` and `zopen`/`zread`/`zclose` in
//! `zparser.c`. The include chain there is `z->include`, a single
//! optional child pointer threaded through recursive `zread` calls; here
//! it is the same shape (`Option<Box<Session>>`), but traversed with an
//! explicit loop in [`Session::next_record`] rather than Rust recursion,
//! and guarded by a depth cap and a canonical-path set not present in
//! the original (see the include-cycle decision in this crate's design
//! notes).
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::lexer;
use crate::record::Record;
use crate::resolver::{self, DirectiveOutcome};

/// Maximum `$INCLUDE` nesting depth, guarding against runaway recursion
/// when cycle detection alone would still allow very deep legitimate
/// chains.
pub const MAX_INCLUDE_DEPTH: usize = 32;

/// A single open zone file and its parsing state.
pub struct Session {
    path: PathBuf,
    reader: BufReader<File>,
    line_buf: String,
    lines: u64,
    errors: u64,
    default_ttl: i64,
    default_class: u16,
    origin: Vec<u8>,
    prev_owner: Option<Vec<u8>>,
    include: Option<Box<Session>>,
    /// Canonical paths of this session and every ancestor that opened it
    /// via `$INCLUDE`, used to reject a self-including zone file.
    ancestors: HashSet<PathBuf>,
    depth: usize,
    current: Option<Record>,
    fatal: bool,
}

impl Session {
    /// Opens `path` as a top-level zone file with the given default TTL,
    /// default class and origin (plain zone-file text, e.g. `"."` or
    /// `"example.com."`).
    pub fn open(
        path: impl AsRef<Path>,
        default_ttl: u32,
        default_class: u16,
        origin: &str,
    ) -> Result<Self> {
        let origin_wire = crate::domain::encode_name(origin, &crate::domain::root())?;
        Self::open_with_ancestors(path.as_ref(), default_ttl as i64, default_class, origin_wire, HashSet::new(), 0)
    }

    fn open_with_ancestors(
        path: &Path,
        default_ttl: i64,
        default_class: u16,
        origin: Vec<u8>,
        mut ancestors: HashSet<PathBuf>,
        depth: usize,
    ) -> Result<Self> {
        let file = File::open(path)?;
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !ancestors.insert(canonical) {
            return Err(syntax(format!("$INCLUDE cycle detected at {}", path.display())));
        }

        Ok(Session {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            line_buf: String::new(),
            lines: 0,
            errors: 0,
            default_ttl,
            default_class,
            origin,
            prev_owner: None,
            include: None,
            ancestors,
            depth,
            current: None,
            fatal: false,
        })
    }

    /// Number of physical lines read so far, accumulated from any
    /// finished `$INCLUDE` children.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Number of record- and directive-level errors seen so far. Never
    /// decreases. A non-zero value does not imply end of stream.
    pub fn errors(&self) -> u64 {
        self.errors
    }

    /// Returns the next record, or `None` at end of file or after a fatal
    /// lexical/resource-limit error. The returned reference is invalidated
    /// by the next call.
    pub fn next_record(&mut self) -> Result<Option<&Record>> {
        self.current = self.next_record_owned()?;
        Ok(self.current.as_ref())
    }

    /// Releases the open file and buffers. Provided for symmetry with the
    /// original `open`/`next_record`/`close` lifecycle; dropping a
    /// `Session` has the same effect.
    pub fn close(self) {}

    fn next_record_owned(&mut self) -> Result<Option<Record>> {
        if self.fatal {
            return Ok(None);
        }

        loop {
            if let Some(child) = self.include.as_mut() {
                if let Some(rec) = child.next_record_owned()? {
                    return Ok(Some(rec));
                }
                let child = self.include.take().unwrap();
                self.lines += child.lines;
                self.errors += child.errors;
                continue;
            }

            let tokens = match lexer::read_logical_record(&mut self.reader, &mut self.line_buf, &mut self.lines) {
                Ok(Some(tokens)) => tokens,
                Ok(None) => return Ok(None),
                Err(Error::ResourceLimit(what)) => {
                    self.errors += 1;
                    self.fatal = true;
                    warn!("{}: resource limit exceeded: {what}", self.path.display());
                    return Ok(None);
                }
                Err(e) => {
                    self.errors += 1;
                    self.fatal = true;
                    warn!("{}: {e}", self.path.display());
                    return Ok(None);
                }
            };

            if resolver::is_directive(&tokens) {
                match resolver::resolve_directive(&tokens, &self.origin) {
                    Ok(DirectiveOutcome::Ttl(v)) => self.default_ttl = v,
                    Ok(DirectiveOutcome::Origin(wire)) => self.origin = wire,
                    Ok(DirectiveOutcome::Include { file, origin }) => {
                        let child_origin = origin.unwrap_or_else(|| self.origin.clone());
                        if self.depth + 1 > MAX_INCLUDE_DEPTH {
                            self.errors += 1;
                            warn!("{}: $INCLUDE nested too deeply", self.path.display());
                            continue;
                        }
                        let include_path = resolve_include_path(&self.path, &file);
                        match Session::open_with_ancestors(
                            &include_path,
                            self.default_ttl,
                            self.default_class,
                            child_origin,
                            self.ancestors.clone(),
                            self.depth + 1,
                        ) {
                            Ok(child) => {
                                debug!("including {}", include_path.display());
                                self.include = Some(Box::new(child));
                            }
                            Err(e) => {
                                self.errors += 1;
                                warn!("{}: cannot open $INCLUDE file: {e}", include_path.display());
                            }
                        }
                    }
                    Err(e) => {
                        self.errors += 1;
                        warn!("{}:{}: {e}", self.path.display(), self.lines);
                    }
                }
                continue;
            }

            let header = match resolver::resolve_header(
                &tokens,
                &self.origin,
                self.default_ttl,
                self.default_class,
                self.prev_owner.as_deref(),
            ) {
                Ok(h) => h,
                Err(e) => {
                    self.errors += 1;
                    warn!("{}:{}: {e}", self.path.display(), self.lines);
                    continue;
                }
            };

            let rdata_tokens = &tokens[header.rdata_start..];
            let fields = match crate::rdata::assemble(header.rtype, rdata_tokens, &self.origin) {
                Ok(f) => f,
                Err(e @ Error::ResourceLimit(_)) => {
                    self.errors += 1;
                    self.fatal = true;
                    warn!("{}:{}: {e}", self.path.display(), self.lines);
                    return Ok(None);
                }
                Err(e) => {
                    self.errors += 1;
                    warn!("{}:{}: {e}", self.path.display(), self.lines);
                    continue;
                }
            };

            if header.ttl < 0 || header.ttl > u32::MAX as i64 {
                self.errors += 1;
                warn!("{}:{}: ttl out of range", self.path.display(), self.lines);
                continue;
            }

            self.prev_owner = Some(header.owner.clone());
            return Ok(Some(Record::new(
                header.owner,
                header.rtype,
                header.class,
                header.ttl as u32,
                fields,
            )));
        }
    }
}

/// Resolves a `$INCLUDE` file argument relative to the directory holding
/// the including zone file, the same way `fopen()` on a relative path in
/// `zparser.c` resolves relative to the process's current directory --
/// except here relative to the parent file, which composes correctly
/// when zone files `$INCLUDE` siblings from a different working
/// directory than the shell's.
fn resolve_include_path(parent: &Path, file: &str) -> PathBuf {
    let candidate = Path::new(file);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }
    match parent.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(candidate),
        _ => candidate.to_path_buf(),
    }
}

fn syntax(msg: impl Into<String>) -> Error {
    crate::error::SyntaxError::new(msg, String::new(), 0).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_zone(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn minimal_a_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_zone(&dir, "z.zone", "example.com. 3600 IN A 192.0.2.1\n");
        let mut session = Session::open(&path, 3600, 1, ".").unwrap();
        let rec = session.next_record().unwrap().unwrap();
        assert_eq!(rec.rtype, crate::name::rtype::A);
        assert_eq!(rec.ttl, 3600);
        assert_eq!(rec.class, 1);
        assert_eq!(rec.fields[0].0, vec![192, 0, 2, 1]);
        assert!(session.next_record().unwrap().is_none());
        assert_eq!(session.errors(), 0);
    }

    #[test]
    fn ttl_and_origin_directives() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_zone(
            &dir,
            "z.zone",
            "$ORIGIN example.com.\n$TTL 1h\na A 10.0.0.1\n",
        );
        let mut session = Session::open(&path, 0, 1, ".").unwrap();
        let rec = session.next_record().unwrap().unwrap();
        assert_eq!(rec.ttl, 3600);
        assert_eq!(
            rec.owner,
            crate::domain::encode_name("a.example.com.", &crate::domain::root()).unwrap()
        );
    }

    #[test]
    fn owner_inheritance_across_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_zone(
            &dir,
            "z.zone",
            "foo IN SOA ns root (\n  1 2 3 4 5 )\n  MX 10 mail\n",
        );
        let mut session = Session::open(&path, 3600, 1, ".").unwrap();
        let soa = session.next_record().unwrap().unwrap();
        let soa_owner = soa.owner.clone();
        assert_eq!(soa.fields.len(), 7);
        let mx = session.next_record().unwrap().unwrap();
        assert_eq!(mx.owner, soa_owner);
        assert_eq!(mx.rtype, crate::name::rtype::MX);
    }

    #[test]
    fn error_recovery_skips_bad_record_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_zone(
            &dir,
            "z.zone",
            "x A notanip\ny A 192.0.2.2\n",
        );
        let mut session = Session::open(&path, 3600, 1, ".").unwrap();
        let rec = session.next_record().unwrap().unwrap();
        assert_eq!(rec.fields[0].0, vec![192, 0, 2, 2]);
        assert!(session.next_record().unwrap().is_none());
        assert_eq!(session.errors(), 1);
    }

    #[test]
    fn include_directive_splices_child_records() {
        let dir = tempfile::tempdir().unwrap();
        write_zone(&dir, "child.zone", "child A 192.0.2.9\n");
        let path = write_zone(
            &dir,
            "parent.zone",
            "$INCLUDE child.zone\nparent A 192.0.2.10\n",
        );
        let mut session = Session::open(&path, 3600, 1, ".").unwrap();
        let first = session.next_record().unwrap().unwrap();
        assert_eq!(first.fields[0].0, vec![192, 0, 2, 9]);
        let second = session.next_record().unwrap().unwrap();
        assert_eq!(second.fields[0].0, vec![192, 0, 2, 10]);
        assert!(session.next_record().unwrap().is_none());
    }

    #[test]
    fn missing_include_file_increments_errors_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_zone(
            &dir,
            "parent.zone",
            "$INCLUDE nonexistent.zone\na A 192.0.2.1\n",
        );
        let mut session = Session::open(&path, 3600, 1, ".").unwrap();
        let rec = session.next_record().unwrap().unwrap();
        assert_eq!(rec.fields[0].0, vec![192, 0, 2, 1]);
        assert_eq!(session.errors(), 1);
    }

    #[test]
    fn self_include_cycle_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_zone(&dir, "loop.zone", "$INCLUDE loop.zone\na A 192.0.2.1\n");
        let mut session = Session::open(&path, 3600, 1, ".").unwrap();
        let rec = session.next_record().unwrap().unwrap();
        assert_eq!(rec.fields[0].0, vec![192, 0, 2, 1]);
        assert_eq!(session.errors(), 1);
    }

    #[test]
    fn indented_first_line_with_no_prior_owner_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_zone(&dir, "z.zone", "  A 192.0.2.1\n");
        let mut session = Session::open(&path, 3600, 1, ".").unwrap();
        assert!(session.next_record().unwrap().is_none());
        assert_eq!(session.errors(), 1);
    }
}
