//! Error types for the launcher.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures converting between UTF-16 and UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("Can not convert wstring to UTF8.")]
    InvalidWide,

    #[error("Can not convert UTF8 to wstring.")]
    InvalidPortable,

    /// The OS did not hand over an argument vector at all.
    #[error("No wide argument vector available.")]
    MissingArgv,

    #[error("Wide argument {0} is null.")]
    NullArgument(usize),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("No command line find.")]
    NoCommand,

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("Can not allocate memory, needed memory: {requested}")]
    Allocation { requested: usize },

    #[error("CreateProcess failed ({code}).")]
    CreateProcess { code: u32 },

    #[error("Can not initialize logging: {0}")]
    Log(anyhow::Error),
}
