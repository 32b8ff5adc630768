//! The host an extension is being resolved for.
//!
//! [`HostContext`] bundles what the resolver needs to know about the running
//! host: its version (for compatibility checks), the cloud it talks to (for
//! mirrored artifact locations) and local configuration.

use std::collections::BTreeMap;

use extidx_meta::{ExtVersion, ExtensionMetadata};

use crate::config::LocalConfig;
use crate::error::Result;

/// Config section holding cloud settings.
pub const CLOUD_SECTION: &str = "cloud";

/// Name of the cloud used when none is configured.
pub const DEFAULT_CLOUD: &str = "public";

/// Outcome of a compatibility check, with the bounds that were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compatibility {
    pub is_compatible: bool,
    pub host_version: String,
    pub min_required: Option<String>,
    pub max_required: Option<String>,
    /// Lowest release of this extension the host still accepts.
    pub min_ext_required: Option<String>,
}

/// Read-only information about the host.
pub trait HostContext {
    /// Version of the running host.
    fn host_version(&self) -> &ExtVersion;

    /// Check whether a release described by `metadata` can run on this host.
    fn is_compatible(&self, metadata: &ExtensionMetadata) -> Result<Compatibility>;

    /// Root under which extension artifacts are mirrored, if any.
    fn mirror_endpoint(&self) -> Option<&str>;

    fn has_mirror_endpoint(&self) -> bool {
        self.mirror_endpoint().is_some()
    }

    /// Local configuration lookup.
    fn local_config(&self, section: &str, key: &str) -> Option<String>;
}

/// Endpoints a cloud declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloudEndpoints {
    /// Storage root that mirrors the public extension artifacts.
    pub mirror_storage: Option<String>,
}

/// A named cloud and its endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cloud {
    pub name: String,
    pub endpoints: CloudEndpoints,
}

impl Default for Cloud {
    fn default() -> Self {
        Self {
            name: DEFAULT_CLOUD.to_string(),
            endpoints: CloudEndpoints::default(),
        }
    }
}

impl Cloud {
    /// Read the `[cloud]` section: `name` and `mirror_endpoint`.
    pub fn from_config(config: &LocalConfig) -> Self {
        Self {
            name: config
                .get(CLOUD_SECTION, "name")
                .unwrap_or_else(|| DEFAULT_CLOUD.to_string()),
            endpoints: CloudEndpoints {
                mirror_storage: config.get(CLOUD_SECTION, "mirror_endpoint"),
            },
        }
    }
}

/// The standard [`HostContext`] implementation.
#[derive(Debug, Clone)]
pub struct Host {
    version: ExtVersion,
    cloud: Cloud,
    config: LocalConfig,
    min_extension_versions: BTreeMap<String, ExtVersion>,
}

impl Host {
    /// A host with no cloud endpoints and no local configuration.
    pub fn new(version: ExtVersion) -> Self {
        Self {
            version,
            cloud: Cloud::default(),
            config: LocalConfig::empty(),
            min_extension_versions: BTreeMap::new(),
        }
    }

    /// A host whose cloud is read from `config`.
    pub fn from_config(version: ExtVersion, config: LocalConfig) -> Self {
        Self {
            cloud: Cloud::from_config(&config),
            config,
            ..Self::new(version)
        }
    }

    pub fn with_cloud(mut self, cloud: Cloud) -> Self {
        self.cloud = cloud;
        self
    }

    /// Refuse releases of `extension` older than `version`.
    pub fn with_min_extension_version(
        mut self,
        extension: impl Into<String>,
        version: ExtVersion,
    ) -> Self {
        self.min_extension_versions.insert(extension.into(), version);
        self
    }

    pub fn cloud(&self) -> &Cloud {
        &self.cloud
    }

    pub fn config(&self) -> &LocalConfig {
        &self.config
    }
}

impl HostContext for Host {
    fn host_version(&self) -> &ExtVersion {
        &self.version
    }

    fn is_compatible(&self, metadata: &ExtensionMetadata) -> Result<Compatibility> {
        // An empty bound is no bound.
        let min_required = metadata.min_host_version.clone().filter(|s| !s.is_empty());
        let max_required = metadata.max_host_version.clone().filter(|s| !s.is_empty());
        let min_ext_required = metadata
            .name
            .as_deref()
            .and_then(|name| self.min_extension_versions.get(name));

        // Bounds are checked in order; later ones are not parsed once one fails.
        let is_compatible = 'check: {
            if let Some(min) = min_required.as_deref() {
                if self.version < ExtVersion::parse(min)? {
                    break 'check false;
                }
            }
            if let Some(max) = max_required.as_deref() {
                if self.version > ExtVersion::parse(max)? {
                    break 'check false;
                }
            }
            if let Some(min_ext) = min_ext_required {
                if &ExtVersion::parse(&metadata.version)? < min_ext {
                    break 'check false;
                }
            }
            true
        };

        Ok(Compatibility {
            is_compatible,
            host_version: self.version.to_string(),
            min_required,
            max_required,
            min_ext_required: min_ext_required.map(ToString::to_string),
        })
    }

    fn mirror_endpoint(&self) -> Option<&str> {
        self.cloud
            .endpoints
            .mirror_storage
            .as_deref()
            .filter(|endpoint| !endpoint.is_empty())
    }

    fn local_config(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn host(version: &str) -> Host {
        Host::new(ExtVersion::parse(version).unwrap())
    }

    fn metadata(min: Option<&str>, max: Option<&str>) -> ExtensionMetadata {
        ExtensionMetadata {
            version: "1.0.0".into(),
            min_host_version: min.map(Into::into),
            max_host_version: max.map(Into::into),
            ..Default::default()
        }
    }

    #[rstest]
    #[case(None, None, true)]
    #[case(Some("2.40.0"), None, true)]
    #[case(Some("2.50.0"), None, true)]
    #[case(Some("2.51.0"), None, false)]
    #[case(None, Some("2.50.0"), true)]
    #[case(None, Some("2.49.9"), false)]
    #[case(Some("2.0.0"), Some("3.0.0"), true)]
    fn test_host_bounds(
        #[case] min: Option<&str>,
        #[case] max: Option<&str>,
        #[case] expected: bool,
    ) {
        let result = host("2.50.0").is_compatible(&metadata(min, max)).unwrap();
        assert_eq!(result.is_compatible, expected);
        assert_eq!(result.host_version, "2.50.0");
        assert_eq!(result.min_required.as_deref(), min);
        assert_eq!(result.max_required.as_deref(), max);
    }

    #[test]
    fn test_min_extension_version() {
        let host = host("2.50.0")
            .with_min_extension_version("legacy", ExtVersion::parse("0.3.0").unwrap());
        let mut meta = metadata(None, None);
        meta.name = Some("legacy".into());
        meta.version = "0.2.9".into();

        let result = host.is_compatible(&meta).unwrap();
        assert!(!result.is_compatible);
        assert_eq!(result.min_ext_required.as_deref(), Some("0.3.0"));

        meta.version = "0.3.0".into();
        assert!(host.is_compatible(&meta).unwrap().is_compatible);
    }

    #[test]
    fn test_unparseable_bound_is_error() {
        let result = host("2.50.0").is_compatible(&metadata(Some("two"), None));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_bounds_are_ignored() {
        let result = host("2.50.0")
            .is_compatible(&metadata(Some(""), Some("")))
            .unwrap();
        assert!(result.is_compatible);
        assert!(result.min_required.is_none());
        assert!(result.max_required.is_none());
    }

    #[test]
    fn test_failed_min_skips_max() {
        let result = host("2.50.0")
            .is_compatible(&metadata(Some("3.0.0"), Some("two")))
            .unwrap();
        assert!(!result.is_compatible);
    }

    #[test]
    fn test_unparseable_max_after_passing_min_is_error() {
        let result = host("2.50.0").is_compatible(&metadata(Some("2.0.0"), Some("two")));
        assert!(result.is_err());
    }

    #[test]
    fn test_cloud_from_config() {
        let config = LocalConfig::from_toml_str(
            "[cloud]\nname = \"isolated\"\nmirror_endpoint = \"https://mirror.internal\"\n",
        )
        .unwrap();
        let host = Host::from_config(ExtVersion::parse("2.0").unwrap(), config);

        assert_eq!(host.cloud().name, "isolated");
        assert!(host.has_mirror_endpoint());
        assert_eq!(host.mirror_endpoint(), Some("https://mirror.internal"));
    }

    #[test]
    fn test_default_cloud_has_no_mirror() {
        let host = host("2.0");
        assert_eq!(host.cloud().name, DEFAULT_CLOUD);
        assert!(!host.has_mirror_endpoint());
        assert!(host.local_config("extension", "index_url").is_none());
    }
}
