//! Process argument acquisition.
//!
//! On Windows the arguments are re-read from the wide command line so that
//! text outside the active code page survives; the runtime-provided vector is
//! only a fallback.

use std::ffi::OsString;

use crate::encoding::wide_to_portable;
use crate::error::EncodingError;

/// How the argument list was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentSource {
    /// Converted from the OS wide command line; every token is valid UTF-8.
    Wide,
    /// The vector the runtime supplied, as is.
    Native,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arguments {
    Wide(Vec<String>),
    Native(Vec<OsString>),
}

impl Arguments {
    /// Reads the current process arguments, preferring the wide command line.
    ///
    /// When the runtime-provided vector had to be used, the reason comes back
    /// alongside it. Conversion failures are also reported on stderr; a
    /// missing wide vector is not, it is the normal case off Windows.
    pub fn from_process() -> (Arguments, Option<EncodingError>) {
        match read_wide_argv() {
            Ok(args) => (Arguments::Wide(args), None),
            Err(err) => {
                if err != EncodingError::MissingArgv {
                    eprint!("{}", err);
                }
                (Arguments::Native(std::env::args_os().collect()), Some(err))
            }
        }
    }

    pub fn source(&self) -> ArgumentSource {
        match self {
            Arguments::Wide(_) => ArgumentSource::Wide,
            Arguments::Native(_) => ArgumentSource::Native,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Arguments::Wide(args) => args.len(),
            Arguments::Native(args) => args.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_os_args(&self) -> Vec<OsString> {
        match self {
            Arguments::Wide(args) => args.iter().map(OsString::from).collect(),
            Arguments::Native(args) => args.clone(),
        }
    }
}

/// Converts every item with `convert`, or none of them.
///
/// Items converted before a failure are dropped before the error is returned.
pub fn convert_all<I, R, E, F>(items: I, convert: F) -> Result<Vec<R>, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<R, E>,
{
    items.into_iter().map(convert).collect()
}

/// Converts a wide argument vector to UTF-8.
///
/// A missing or empty vector, a null entry, or any unconvertible entry fails
/// the whole conversion.
pub fn argv_w_to_argv<W>(argv: Option<&[Option<W>]>) -> Result<Vec<String>, EncodingError>
where W: AsRef<[u16]> {
    let argv = match argv {
        Some(argv) if !argv.is_empty() => argv,
        _ => return Err(EncodingError::MissingArgv),
    };
    convert_all(argv.iter().enumerate(), |(index, arg)| match arg {
        Some(arg) => wide_to_portable(arg.as_ref()),
        None => Err(EncodingError::NullArgument(index)),
    })
}

#[cfg(windows)]
fn read_wide_argv() -> Result<Vec<String>, EncodingError> {
    use windows::{
        core::*,
        Win32::System::Environment::GetCommandLineW,
        Win32::System::Memory::LocalFree,
        Win32::UI::Shell::CommandLineToArgvW,
    };

    unsafe {
        let cl = GetCommandLineW();
        let mut argc: i32 = 0;
        let argvw = CommandLineToArgvW(PCWSTR(cl.0), &mut argc);
        if argvw.is_null() {
            return argv_w_to_argv::<&[u16]>(None);
        }

        let raw = std::slice::from_raw_parts(argvw, argc.max(0) as usize);
        let wide: Vec<Option<&[u16]>> = raw
            .iter()
            .map(|arg| {
                if arg.0.is_null() {
                    return None;
                }
                let mut len = 0;
                while *arg.0.add(len) != 0 {
                    len += 1;
                }
                Some(std::slice::from_raw_parts(arg.0 as *const u16, len))
            })
            .collect();

        let converted = argv_w_to_argv(Some(wide.as_slice()));
        drop(wide);
        LocalFree(argvw as isize);
        converted
    }
}

#[cfg(not(windows))]
fn read_wide_argv() -> Result<Vec<String>, EncodingError> {
    argv_w_to_argv::<&[u16]>(None)
}
