use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use itertools::{EitherOrBoth, Itertools};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParseError, VersionTemplate};

/// Semantic version `major.minor.patch` with an optional special (prerelease)
/// string.
///
/// Versions are ordered by [Semantic Versioning](https://semver.org)
/// precedence, so a prerelease sorts before the corresponding release:
///
/// ```
/// use semtag::SemanticVersion;
///
/// let rc = SemanticVersion::new(1, 0, 0).with_special("rc.1");
/// assert!(rc < SemanticVersion::new(1, 0, 0));
/// assert!(rc > SemanticVersion::new(0, 9, 9));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    /// Major version number.
    pub major: u64,
    /// Minor version number.
    pub minor: u64,
    /// Patch version number.
    pub patch: u64,
    /// Special string, such as `alpha.1` or `rc.2`. Also accessible as
    /// [`SemanticVersion::prerelease()`].
    ///
    /// This is a dot-separated list of identifiers, not including the leading
    /// `-`. `None` is distinct from `Some("")`.
    pub special: Option<String>,
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", VersionTemplate::tag().format(self))
    }
}

impl FromStr for SemanticVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let core = |v: &Self| (v.major, v.minor, v.patch);
        core(self)
            .cmp(&core(other))
            .then_with(|| match (&self.special, &other.special) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                // Tiebreak on the raw string so that ordering agrees with `Eq`
                // for strings like `1` and `01`.
                (Some(a), Some(b)) => cmp_special(a, b).then_with(|| a.cmp(b)),
            })
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl SemanticVersion {
    /// Constructs a release version with no special string.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            special: None,
        }
    }

    /// Returns the version with the given special string.
    #[must_use]
    pub fn with_special(mut self, special: impl Into<String>) -> Self {
        self.special = Some(special.into());
        self
    }

    /// Returns the special string. This is the same as
    /// [`SemanticVersion::special`].
    pub fn prerelease(&self) -> Option<&str> {
        self.special.as_deref()
    }
    /// Returns a mutable reference to the special string.
    pub fn prerelease_mut(&mut self) -> &mut Option<String> {
        &mut self.special
    }
    /// Sets the special string.
    pub fn set_prerelease(&mut self, prerelease: Option<String>) {
        self.special = prerelease;
    }

    /// Returns whether the version has a special string.
    pub fn is_prerelease(&self) -> bool {
        self.special.is_some()
    }

    /// Parses a version formatted using [`crate::TAG_FORMAT`], with no missing
    /// fields.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        VersionTemplate::tag().parse(s, false)
    }

    /// Parses a version using `template`, or [`crate::TAG_FORMAT`] if it is
    /// `None`.
    ///
    /// If `allow_missing` is `true`, numeric fields with no digits are parsed
    /// as `0`.
    pub fn parse_with(
        s: &str,
        template: Option<&str>,
        allow_missing: bool,
    ) -> Result<Self, ParseError> {
        match template {
            Some(t) => VersionTemplate::new(t).parse(s, allow_missing),
            None => VersionTemplate::tag().parse(s, allow_missing),
        }
    }

    /// Same as [`SemanticVersion::parse_with()`], but accepts a missing input
    /// string, which is always an error.
    pub fn parse_opt(
        s: Option<&str>,
        template: Option<&str>,
        allow_missing: bool,
    ) -> Result<Self, ParseError> {
        Self::parse_with(s.ok_or(ParseError::NoInput)?, template, allow_missing)
    }

    /// Formats the version using `template`.
    ///
    /// See [`VersionTemplate`] for the template syntax.
    pub fn format(&self, template: &str) -> String {
        VersionTemplate::new(template).format(self)
    }
}

/// Compares two special strings by Semantic Versioning precedence.
///
/// Identifiers are compared pairwise. Numeric identifiers are compared as
/// numbers and always sort before alphanumeric ones. If every shared identifier
/// is equal, the string with fewer identifiers sorts first.
fn cmp_special(a: &str, b: &str) -> Ordering {
    a.split('.')
        .zip_longest(b.split('.'))
        .map(|pair| match pair {
            EitherOrBoth::Both(a, b) => cmp_identifier(a, b),
            EitherOrBoth::Left(_) => Ordering::Greater,
            EitherOrBoth::Right(_) => Ordering::Less,
        })
        .find(|&ord| ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn cmp_identifier(a: &str, b: &str) -> Ordering {
    let is_numeric = |s: &str| !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit());
    match (is_numeric(a), is_numeric(b)) {
        (true, true) => cmp_numeric(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

/// Compares two strings of ASCII digits by numeric value, without any limit on
/// their length.
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cmp_identifier() {
        assert_eq!(cmp_identifier("3", "11"), Ordering::Less);
        assert_eq!(cmp_identifier("11", "3"), Ordering::Greater);
        assert_eq!(cmp_identifier("007", "7"), Ordering::Equal);
        assert_eq!(cmp_identifier("999", "a"), Ordering::Less);
        assert_eq!(cmp_identifier("a", "0"), Ordering::Greater);
        assert_eq!(cmp_identifier("alpha", "beta"), Ordering::Less);
        assert_eq!(cmp_identifier("1a", "1b"), Ordering::Less);
        assert_eq!(
            cmp_identifier("123456789012345678901234567890", "99"),
            Ordering::Greater,
        );
    }

    #[test]
    fn test_cmp_special() {
        assert_eq!(cmp_special("alpha", "alpha.1"), Ordering::Less);
        assert_eq!(cmp_special("alpha.1", "alpha"), Ordering::Greater);
        assert_eq!(cmp_special("beta.3", "beta.11"), Ordering::Less);
        assert_eq!(cmp_special("1.2", "1.2"), Ordering::Equal);
        assert_eq!(cmp_special("alpha.01", "alpha.1"), Ordering::Equal);
    }

    #[test]
    fn test_ord_agrees_with_eq() {
        let a = SemanticVersion::new(1, 0, 0).with_special("alpha.01");
        let b = SemanticVersion::new(1, 0, 0).with_special("alpha.1");
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn test_empty_special_is_prerelease() {
        let empty = SemanticVersion::new(1, 0, 0).with_special("");
        assert!(empty < SemanticVersion::new(1, 0, 0));
        assert!(empty < SemanticVersion::new(1, 0, 0).with_special("a"));
    }
}
