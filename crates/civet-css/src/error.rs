//! Engine status codes.
//!
//! Every fallible operation in the engine returns one of the codes below.
//! Three kinds exist: programmer errors (`BadParm`) are caught at API
//! entry and never produced deeper; resource exhaustion (`NoMem`)
//! propagates unchanged from any layer; input errors (`Invalid`,
//! `BadCharset`, `Eof`) are recoverable inside the parser and only reach
//! the caller when a parse is unrecoverable. `NeedData` is not an error
//! at all but a suspension point: the parser wants more input bytes.

use strum_macros::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Result type used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Engine status codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Error, EnumString, EnumIter, IntoStaticStr,
)]
pub enum Error {
    /// Insufficient memory while building engine structures.
    #[error("Insufficient memory")]
    #[strum(serialize = "NOMEM")]
    NoMem,

    /// Invalid arguments detected before any work was done.
    #[error("Bad parameter")]
    #[strum(serialize = "BADPARM")]
    BadParm,

    /// Well-formed input that fails validation.
    #[error("Invalid input")]
    #[strum(serialize = "INVALID")]
    Invalid,

    /// A referenced resource does not exist.
    #[error("File not found")]
    #[strum(serialize = "FILENOTFOUND")]
    FileNotFound,

    /// More input bytes are required; resume with another data append.
    #[error("Insufficient data")]
    #[strum(serialize = "NEEDDATA")]
    NeedData,

    /// BOM and `@charset` disagree about the sheet's encoding.
    #[error("BOM and @charset mismatch")]
    #[strum(serialize = "BADCHARSET")]
    BadCharset,

    /// Unexpected end of input during a mandatory production.
    #[error("EOF encountered")]
    #[strum(serialize = "EOF")]
    Eof,
}

impl Error {
    /// The canonical name of this code (`"NOMEM"`, `"BADPARM"`, ...).
    ///
    /// Round-trips through [`Error::from_name`].
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Parse a canonical name back into a code.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_code_round_trips_through_its_name() {
        for code in Error::iter() {
            assert_eq!(Error::from_name(code.name()), Some(code));
        }
    }

    #[test]
    fn unknown_names_do_not_parse() {
        assert_eq!(Error::from_name("WONTFIX"), None);
        assert_eq!(Error::from_name(""), None);
        assert_eq!(Error::from_name("nomem"), None);
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(Error::NeedData.to_string(), "Insufficient data");
        assert_eq!(Error::BadCharset.to_string(), "BOM and @charset mismatch");
    }
}
