//! Wheel filename tag parsing.
//!
//! Artifact filenames follow the wheel naming convention:
//!
//! ```text
//! {name}-{version}(-{build})?-{python tag}-{abi tag}-{platform tag}.whl
//! ```
//!
//! Only the tags are interpreted here; the version in the filename is never
//! used for ranking (the metadata version is authoritative).

use std::sync::LazyLock;

use regex::Regex;

static WHEEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<name>.+?)
        (?:-(?P<version>\d.+?))?
        (?:-(?P<build>\d.*?))?
        -(?P<python>.+?)
        -(?P<abi>.+?)
        -(?P<platform>.+?)
        \.whl$",
    )
    .unwrap()
});

/// ABI tag of an artifact that does not depend on an interpreter ABI.
pub const ABI_NONE: &str = "none";

/// Platform tag of an artifact that runs on every platform.
pub const PLATFORM_ANY: &str = "any";

/// Tags parsed from a wheel filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelInfo {
    pub name: String,
    pub version: Option<String>,
    pub build: Option<String>,
    pub python_tag: String,
    pub abi_tag: String,
    pub platform_tag: String,
}

impl WheelInfo {
    /// Parse a wheel filename. Returns `None` when the name does not follow
    /// the convention.
    pub fn parse(filename: &str) -> Option<Self> {
        let caps = WHEEL_PATTERN.captures(filename)?;
        let owned = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        Some(Self {
            name: owned("name")?,
            version: owned("version"),
            build: owned("build"),
            python_tag: owned("python")?,
            abi_tag: owned("abi")?,
            platform_tag: owned("platform")?,
        })
    }

    /// Whether the artifact is platform independent (`none` ABI, `any` platform).
    pub fn is_universal(&self) -> bool {
        self.abi_tag == ABI_NONE && self.platform_tag == PLATFORM_ANY
    }
}

/// Convenience wrapper: `true` only for well-formed universal wheel filenames.
pub fn is_universal_filename(filename: &str) -> bool {
    WheelInfo::parse(filename).is_some_and(|info| info.is_universal())
}
