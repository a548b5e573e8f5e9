//! Option parsing.
//!
//! Options are only recognised before the first positional argument; from
//! there on every token, dashes included, belongs to the command to launch.
//! `-h` and `-v` act as soon as they are reached, left to right, so anything
//! after them is never looked at.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::{AppSettings, Arg, Command};

use crate::argv::Arguments;
use crate::error::{Error, Result};

pub const PRODUCT_NAME: &str = "RunHiddenConsole";

pub const USAGE: &str = "RunHiddenConsole: Start console program without console window.
RunHiddenConsole [options] <command line>
Options:
-v  --version            Show program version and then exit.
-h  --help               Show help information and then exit.
    --log-file <FILE>    Write diagnostics to FILE.
    --log-level <LEVEL>  Diagnostics level: error, warn, info, debug or trace (default info).
";

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

pub fn version_text() -> String {
    format!(
        "{name}: Start console program without console window.
Version: {version}
Build with {toolchain}
",
        name = PRODUCT_NAME,
        version = env!("CARGO_PKG_VERSION"),
        toolchain = env!("RHC_BUILD_TOOLCHAIN"),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    pub file: PathBuf,
    pub level: log::Level,
}

/// What the tool was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    Launch {
        /// Command tokens, in order, as bytes.
        command: Vec<Vec<u8>>,
        log: Option<LogOptions>,
    },
}

fn command() -> Command<'static> {
    Command::new(PRODUCT_NAME)
        .setting(AppSettings::TrailingVarArg)
        .setting(AppSettings::DisableHelpFlag)
        .arg(Arg::new("show-help")
            .short('h')
            .long("help")
            .multiple_occurrences(true))
        .arg(Arg::new("show-version")
            .short('v')
            .long("version")
            .multiple_occurrences(true))
        .arg(Arg::new("log-file")
            .long("log-file")
            .value_name("FILE")
            .allow_invalid_utf8(true)
            .takes_value(true))
        .arg(Arg::new("log-level")
            .long("log-level")
            .value_name("LEVEL")
            .possible_values(LOG_LEVELS.iter().copied())
            .ignore_case(true)
            .takes_value(true))
        .arg(Arg::new("command")
            .value_name("COMMAND")
            .allow_invalid_utf8(true)
            .multiple_values(true))
}

// The first `-h`/`-v` reached before the command or a parse problem.
fn first_informational(args: &[OsString]) -> Option<Invocation> {
    let mut tokens = args.iter().skip(1);
    while let Some(token) = tokens.next() {
        let token = token.to_str()?;
        match token {
            "--help" => return Some(Invocation::Help),
            "--version" => return Some(Invocation::Version),
            "--log-file" | "--log-level" => {
                tokens.next();
            }
            _ if token.starts_with("--log-file=") || token.starts_with("--log-level=") => {}
            _ if token.starts_with('-') && token.len() > 1 && !token.starts_with("--") => {
                return match token[1..].chars().next() {
                    Some('h') => Some(Invocation::Help),
                    Some('v') => Some(Invocation::Version),
                    _ => None,
                };
            }
            // `--`, an unknown long option, or the command itself.
            _ => return None,
        }
    }
    None
}

/// Parses the full argument list, program name included.
pub fn parse(arguments: &Arguments) -> Result<Invocation> {
    let args = arguments.to_os_args();
    if let Some(invocation) = first_informational(&args) {
        return Ok(invocation);
    }

    let matches = command()
        .try_get_matches_from(args)
        .map_err(|err| {
            crate::trace!("args", log::Level::Debug, "Option parsing failed: {:?}", err.kind());
            Error::Usage("Use -h to see help.".to_owned())
        })?;

    if matches.is_present("show-help") {
        return Ok(Invocation::Help);
    }
    if matches.is_present("show-version") {
        return Ok(Invocation::Version);
    }

    let command: Vec<Vec<u8>> = matches
        .values_of_os("command")
        .map(|values| values.map(os_bytes).collect())
        .unwrap_or_default();
    if command.is_empty() {
        return Err(Error::NoCommand);
    }

    let log = matches.value_of_os("log-file").map(|file| LogOptions {
        file: PathBuf::from(file),
        level: matches
            .value_of("log-level")
            .and_then(|level| level.parse().ok())
            .unwrap_or(log::Level::Info),
    });

    Ok(Invocation::Launch { command, log })
}

#[cfg(unix)]
fn os_bytes(value: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    value.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn os_bytes(value: &OsStr) -> Vec<u8> {
    value.to_string_lossy().into_owned().into_bytes()
}
