//! Conversion between the OS wide (UTF-16) text form and UTF-8.
//!
//! Conversions are always strict. The flag policy mirrors the Win32
//! `WideCharToMultiByte` / `MultiByteToWideChar` options for callers that
//! hand text to the raw Win32 converters with other code pages.

use crate::error::EncodingError;

pub type CodePage = u32;

pub const CP_ACP: CodePage = 0;
pub const CP_OEMCP: CodePage = 1;
pub const CP_SYMBOL: CodePage = 42;
pub const CP_GB18030: CodePage = 54936;
pub const CP_UTF7: CodePage = 65000;
pub const CP_UTF8: CodePage = 65001;

pub const WC_ERR_INVALID_CHARS: u32 = 0x0000_0080;
pub const MB_ERR_INVALID_CHARS: u32 = 0x0000_0008;

/// The code pages `CP_ACP` and `CP_OEMCP` stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveCodePages {
    pub ansi: CodePage,
    pub oem: CodePage,
}

impl ActiveCodePages {
    pub fn resolve(&self, cp: CodePage) -> CodePage {
        match cp {
            CP_ACP => self.ansi,
            CP_OEMCP => self.oem,
            _ => cp,
        }
    }
}

// Code pages that reject any flags, including the invalid-character ones.
fn rejects_flags(cp: CodePage) -> bool {
    matches!(
        cp,
        50220 | 50221 | 50222 | 50225 | 50227 | 50229 | CP_UTF7 | CP_SYMBOL | 57002..=57011
    )
}

fn effective_flags(requested: u32, strict_bit: u32, cp: CodePage, active: ActiveCodePages) -> u32 {
    let cp = active.resolve(cp);
    if rejects_flags(cp) {
        return 0;
    }
    match cp {
        CP_UTF8 | CP_GB18030 => requested & strict_bit,
        _ => requested,
    }
}

/// Flags to hand to `WideCharToMultiByte` for `cp` when `requested` was asked for.
pub fn wide_to_multibyte_flags(requested: u32, cp: CodePage, active: ActiveCodePages) -> u32 {
    effective_flags(requested, WC_ERR_INVALID_CHARS, cp, active)
}

/// Flags to hand to `MultiByteToWideChar` for `cp` when `requested` was asked for.
pub fn multibyte_to_wide_flags(requested: u32, cp: CodePage, active: ActiveCodePages) -> u32 {
    effective_flags(requested, MB_ERR_INVALID_CHARS, cp, active)
}

/// Converts UTF-16 to UTF-8.
///
/// An unpaired surrogate fails the whole conversion; nothing is replaced.
pub fn wide_to_portable(source: &[u16]) -> Result<String, EncodingError> {
    if source.is_empty() {
        return Ok(String::new());
    }
    String::from_utf16(source).map_err(|_| EncodingError::InvalidWide)
}

/// Converts UTF-8 to UTF-16, the inverse of [`wide_to_portable`].
pub fn portable_to_wide(source: &[u8]) -> Result<Vec<u16>, EncodingError> {
    if source.is_empty() {
        return Ok(Vec::new());
    }
    let text = std::str::from_utf8(source).map_err(|_| EncodingError::InvalidPortable)?;
    Ok(text.encode_utf16().collect())
}
