//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Numeric field of a version.
#[derive(strum::Display, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    /// Major version number (`%M`)
    Major,
    /// Minor version number (`%m`)
    Minor,
    /// Patch version number (`%p`)
    Patch,
}

/// Error produced when parsing a version string against a template.
///
/// Positions are byte offsets into the input string.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// There was no string to parse.
    #[error("no version string to parse")]
    NoInput,
    /// A numeric field had no digits, or the template has no placeholder for
    /// it.
    #[error("missing {field} version number{}", describe_position(.position))]
    MissingField {
        /// Field that was missing.
        field: Field,
        /// Position where the digits were expected, or `None` if the template
        /// has no placeholder for the field.
        position: Option<usize>,
    },
    /// A numeric field does not fit in a `u64`.
    #[error("{field} version number at position {position} is too large")]
    NumberTooLarge {
        /// Field that overflowed.
        field: Field,
        /// Position of the first digit.
        position: usize,
    },
    /// The input does not match a literal character in the template, or has
    /// characters left over after the template ends.
    #[error(
        "expected {} at position {position}, found {}",
        describe_char(.expected),
        describe_char(.found),
    )]
    FormatMismatch {
        /// Position of the mismatch.
        position: usize,
        /// Character required by the template, or `None` if the template
        /// required end of input.
        expected: Option<char>,
        /// Character actually present, or `None` at end of input.
        found: Option<char>,
    },
}

fn describe_position(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" at position {p}"),
        None => " in template".to_owned(),
    }
}

fn describe_char(c: &Option<char>) -> String {
    match c {
        Some(c) => format!("{c:?}"),
        None => "end of input".to_owned(),
    }
}

/// Error produced when saving or loading a version file.
#[derive(Error, Debug)]
pub enum PersistError {
    /// I/O error from the filesystem.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The version file does not exist.
    #[error("version file {0:?} does not exist")]
    NotFound(PathBuf),
    /// The version file contents are not a valid version.
    #[error("error parsing version file {path:?}: {source}")]
    Parse {
        /// Path to the version file.
        path: PathBuf,
        /// Underlying parse error.
        source: ParseError,
    },
}
