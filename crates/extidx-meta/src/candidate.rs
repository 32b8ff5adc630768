//! Candidate records: one published artifact of an extension.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::version::ExtVersion;
use crate::wheel::WheelInfo;

/// Metadata namespace that carries the package details (project URLs etc.).
pub const DETAILS_NAMESPACE: &str = "python.details";

/// One published artifact of an extension, as listed in the index.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Artifact filename, encoding the wheel tags.
    pub filename: String,
    /// Package metadata.
    pub metadata: ExtensionMetadata,
    /// Where the artifact can be downloaded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// SHA-256 digest of the artifact, checked by the installer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_digest: Option<String>,
}

impl Candidate {
    /// Parse the metadata version.
    ///
    /// A record without a version only fails here, once resolution reaches it.
    pub fn parsed_version(&self) -> Result<ExtVersion> {
        if self.metadata.version.is_empty() {
            return Err(Error::invalid_version(
                "",
                format!("{} has no metadata version", self.filename),
            ));
        }
        ExtVersion::parse(&self.metadata.version)
    }

    /// Wheel tags from the filename, if it follows the wheel convention.
    pub fn wheel_info(&self) -> Option<WheelInfo> {
        WheelInfo::parse(&self.filename)
    }

    /// Whether the artifact is platform independent.
    pub fn is_universal(&self) -> bool {
        crate::wheel::is_universal_filename(&self.filename)
    }
}

/// Package metadata attached to a candidate.
///
/// Unknown keys are preserved in [`ExtensionMetadata::extra`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExtensionMetadata {
    /// Package version (PEP 440). Empty when the index omits it.
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Lowest host version this release supports.
    #[serde(
        default,
        rename = "minHostVersion",
        alias = "azext.minCliCoreVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_host_version: Option<String>,
    /// Highest host version this release supports.
    #[serde(
        default,
        rename = "maxHostVersion",
        alias = "azext.maxCliCoreVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_host_version: Option<String>,
    /// Namespaced package details, e.g. `python.details`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Value>,
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ExtensionMetadata {
    /// The project home page from `extensions."python.details".project_urls.Home`.
    pub fn home_page(&self) -> Option<&str> {
        self.extensions
            .get(DETAILS_NAMESPACE)?
            .get("project_urls")?
            .get("Home")?
            .as_str()
    }
}
