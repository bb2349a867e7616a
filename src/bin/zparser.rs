//! `zparser` — a trivial driver over [`zonefile::Session`]: reads every
//! record in a zone file, prints a progress line every 100 000 input
//! lines, and prints the total error count at end of file.
//!
//! Grounded on the `main()`/`run()` split and the `init_term_logger`
//! pattern in `src/args.rs` and `dqy/src/main.rs`: `main` stays a thin
//! `ExitCode` dispatcher over a fallible `run()`.
use std::process::ExitCode;

use clap::{Arg, ArgAction, Command};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use zonefile::error::{Error, Result};
use zonefile::name::CLASS_IN;
use zonefile::Session;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROGRESS_EVERY: u64 = 100_000;

fn main() -> ExitCode {
    match run() {
        Ok(errors) => {
            if errors > 0 {
                eprintln!("{errors} error(s) while parsing zone file");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("zparser: {e}");
            // the CLI surface only distinguishes success from failure: any
            // open/usage failure exits 1, regardless of Error::from's
            // finer-grained library-wide exit codes.
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<u64> {
    let matches = Command::new("zparser")
        .version(VERSION)
        .author("Alain Viguier dandyvica@gmail.com")
        .about("Streams the resource records of a DNS master zone file.")
        .override_usage("zparser [OPTIONS] <ZONE-FILE> [ORIGIN]")
        .arg(
            Arg::new("zone-file")
                .help("Path to the zone file to parse")
                .required(true)
                .value_name("ZONE-FILE"),
        )
        .arg(
            Arg::new("origin")
                .help("Origin domain name the zone file is relative to")
                .default_value(".")
                .value_name("ORIGIN"),
        )
        .arg(
            Arg::new("ttl")
                .long("ttl")
                .help("Default TTL in seconds, used until the first $TTL directive")
                .value_name("SECONDS")
                .default_value("3600"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase logging verbosity; may be repeated")
                .action(ArgAction::Count),
        )
        .try_get_matches()
        .map_err(|e| Error::Usage(e.to_string()))?;

    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    init_term_logger(level);

    let zone_file = matches.get_one::<String>("zone-file").expect("required");
    let origin = matches.get_one::<String>("origin").expect("has default");
    let ttl: u32 = matches
        .get_one::<String>("ttl")
        .expect("has default")
        .parse()
        .map_err(|_| Error::Usage("--ttl must be a non-negative integer".to_string()))?;

    let mut session = Session::open(zone_file, ttl, CLASS_IN, origin)?;

    let mut records = 0u64;
    let mut next_progress = PROGRESS_EVERY;
    while let Some(_record) = session.next_record()? {
        records += 1;
        if session.lines() >= next_progress {
            info!("{} lines read, {records} records so far", session.lines());
            next_progress += PROGRESS_EVERY;
        }
    }

    info!(
        "done: {} lines, {records} records, {} errors",
        session.lines(),
        session.errors()
    );

    Ok(session.errors())
}

fn init_term_logger(level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}
