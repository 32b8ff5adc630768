//! Version parsing and ordering.
//!
//! Extension versions in an index follow PEP 440, not strict semver: a
//! release may have any number of components and pre-releases are written
//! without a separator (`1.0.0b2`). [`ExtVersion`] wraps a
//! [`pep440_rs::Version`] for ordering and keeps the text it was parsed from:
//!
//! - release components compare numerically, trailing zeros are ignored
//!   (`1.0 == 1.0.0`)
//! - `1.0.dev1 < 1.0a1 < 1.0b1 < 1.0rc1 < 1.0 < 1.0.post1`
//!
//! # Examples
//!
//! ```
//! use extidx_meta::version::ExtVersion;
//!
//! let beta = ExtVersion::parse("2.0.0b1").unwrap();
//! let release = ExtVersion::parse("2.0").unwrap();
//! assert!(beta < release);
//! assert_eq!(release, ExtVersion::parse("2.0.0").unwrap());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use pep440_rs::Version;

use crate::error::{Error, Result};

/// A parsed extension version.
///
/// Equality and ordering follow PEP 440 semantics rather than the textual
/// form; use [`ExtVersion::as_str`] when the exact text matters.
#[derive(Debug, Clone)]
pub struct ExtVersion {
    raw: String,
    version: Version,
}

impl ExtVersion {
    /// Parse a version string.
    ///
    /// Surrounding whitespace is ignored. Anything PEP 440 rejects is an
    /// [`Error::InvalidVersion`].
    pub fn parse(version: &str) -> Result<Self> {
        let raw = version.trim();
        let parsed = Version::from_str(raw)
            .map_err(|e| Error::invalid_version(version, e.to_string()))?;
        Ok(Self {
            raw: raw.to_string(),
            version: parsed,
        })
    }

    /// The version text as it appeared in the input, trimmed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric release components, e.g. `[1, 2, 0]` for `1.2.0rc1`.
    pub fn release(&self) -> &[u64] {
        self.version.release()
    }

    /// Whether this is a pre-release or dev release.
    pub fn is_prerelease(&self) -> bool {
        self.version.any_prerelease()
    }

    /// The underlying PEP 440 version.
    pub fn pep440(&self) -> &Version {
        &self.version
    }
}

impl Ord for ExtVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

impl PartialOrd for ExtVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ExtVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ExtVersion {}

impl FromStr for ExtVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ExtVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(s: &str) -> ExtVersion {
        ExtVersion::parse(s).unwrap()
    }

    // --- parse ---

    #[test]
    fn test_parse_three_part() {
        let version = v("1.2.3");
        assert_eq!(version.release(), &[1, 2, 3]);
        assert!(!version.is_prerelease());
        assert_eq!(version.as_str(), "1.2.3");
    }

    #[test]
    fn test_parse_trims_and_keeps_text() {
        let version = v("  0.4.1  ");
        assert_eq!(version.to_string(), "0.4.1");
    }

    #[test]
    fn test_parse_prerelease() {
        let version = v("1.0.0b2");
        assert_eq!(version.release(), &[1, 0, 0]);
        assert!(version.is_prerelease());
    }

    #[test]
    fn test_parse_post_and_dev() {
        let version = v("1.0.post3.dev1");
        assert_eq!(version.pep440().post(), Some(3));
        assert_eq!(version.pep440().dev(), Some(1));
        assert!(version.is_prerelease());
    }

    #[test]
    fn test_parse_implicit_post() {
        assert_eq!(v("1.0-2").pep440().post(), Some(2));
    }

    #[test]
    fn test_parse_epoch() {
        assert_eq!(v("2!1.0").pep440().epoch(), 2);
    }

    #[rstest]
    #[case("")]
    #[case("latest")]
    #[case("1.0.0-beta.x")]
    #[case("1..0")]
    #[case("99999999999999999999999.0")]
    fn test_parse_rejects(#[case] input: &str) {
        let err = ExtVersion::parse(input).unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
    }

    // --- ordering ---

    #[rstest]
    #[case("1.0.dev1", "1.0a1")]
    #[case("1.0a1", "1.0a2")]
    #[case("1.0a2", "1.0b1")]
    #[case("1.0b1", "1.0rc1")]
    #[case("1.0rc1", "1.0")]
    #[case("1.0", "1.0.post1")]
    #[case("1.0.post1.dev1", "1.0.post1")]
    #[case("1.0", "1.0+local")]
    #[case("0.9.9", "0.10.0")]
    #[case("1.9", "1.10")]
    #[case("9.0", "1!0.1")]
    fn test_ordering(#[case] lower: &str, #[case] higher: &str) {
        assert!(v(lower) < v(higher), "{lower} should sort below {higher}");
    }

    #[test]
    fn test_trailing_zeros_are_equal() {
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_eq!(v("1"), v("1.0.0.0"));
        assert_ne!(v("1.0.1"), v("1.0"));
    }

    #[test]
    fn test_equal_versions_keep_their_text() {
        let a = v("1.0");
        let b = v("1.0.0");
        assert_eq!(a, b);
        assert_ne!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_case_insensitive_labels() {
        assert_eq!(v("1.0RC1"), v("1.0rc1"));
        assert_eq!(v("1.0c1"), v("1.0rc1"));
        assert_eq!(v("1.0alpha1"), v("1.0a1"));
    }

    #[test]
    fn test_from_str() {
        let parsed: ExtVersion = "2.1".parse().unwrap();
        assert_eq!(parsed, v("2.1.0"));
    }
}
