//! Local configuration lookups.
//!
//! Configuration is a flat `section -> key -> value` store read from a TOML
//! file:
//!
//! ```toml
//! [extension]
//! index_url = "/srv/mirror/index.json"
//!
//! [cloud]
//! name = "isolated"
//! mirror_endpoint = "https://mirror.internal/cli"
//! ```
//!
//! When environment overrides are enabled, `EXTIDX_<SECTION>_<KEY>` takes
//! precedence over the file (e.g. `EXTIDX_EXTENSION_INDEX_URL`).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming the configuration directory.
pub const CONFIG_DIR_ENV: &str = "EXTIDX_CONFIG_DIR";

/// Prefix of per-key environment overrides.
pub const ENV_PREFIX: &str = "EXTIDX";

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Read-only view over local configuration.
#[derive(Debug, Clone, Default)]
pub struct LocalConfig {
    sections: BTreeMap<String, BTreeMap<String, String>>,
    source: Option<PathBuf>,
    env_overrides: bool,
}

impl LocalConfig {
    /// An empty configuration with no environment overrides.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text.
    ///
    /// Scalar values are stored as strings; nested tables below a section
    /// are ignored.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let table: toml::Table = toml::from_str(content)?;
        let mut sections = BTreeMap::new();

        for (section, value) in table {
            let toml::Value::Table(entries) = value else {
                tracing::debug!(%section, "Ignoring top-level config value outside a section");
                continue;
            };
            let mut keys = BTreeMap::new();
            for (key, value) in entries {
                match scalar_to_string(&value) {
                    Some(text) => {
                        keys.insert(key, text);
                    }
                    None => tracing::debug!(%section, %key, "Ignoring non-scalar config value"),
                }
            }
            sections.insert(section, keys);
        }

        Ok(Self {
            sections,
            ..Self::default()
        })
    }

    /// Load configuration from `path`. A missing file yields an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(?path, "No config file found — using defaults");
            return Ok(Self {
                source: Some(path.to_path_buf()),
                ..Self::default()
            });
        }

        tracing::debug!(?path, "Loading config");
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Self::from_toml_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Load the user configuration and enable environment overrides.
    ///
    /// The file is `$EXTIDX_CONFIG_DIR/config.toml`, falling back to
    /// `~/.extidx/config.toml`.
    pub fn discover() -> Result<Self> {
        let config = match config_dir() {
            Some(dir) => Self::load(&dir.join(CONFIG_FILENAME))?,
            None => {
                tracing::debug!("No home directory — skipping config file");
                Self::empty()
            }
        };
        Ok(config.with_env_overrides())
    }

    /// Let `EXTIDX_<SECTION>_<KEY>` environment variables override file values.
    pub fn with_env_overrides(mut self) -> Self {
        self.env_overrides = true;
        self
    }

    /// Set a value, replacing anything loaded from the file.
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Look up `section.key`. Empty values count as absent.
    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        if self.env_overrides {
            if let Ok(value) = std::env::var(env_key(section, key)) {
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }

        self.sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .filter(|value| !value.is_empty())
            .cloned()
    }

    /// The file this configuration was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// The configuration directory, honouring [`CONFIG_DIR_ENV`].
pub fn config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::home_dir().map(|home| home.join(".extidx")),
    }
}

/// Environment variable name overriding `section.key`.
pub fn env_key(section: &str, key: &str) -> String {
    format!("{ENV_PREFIX}_{section}_{key}")
        .to_ascii_uppercase()
        .replace(['-', '.'], "_")
}

fn scalar_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_toml_str() {
        let config = LocalConfig::from_toml_str(
            r#"
[extension]
index_url = "/srv/index.json"
retries = 3

[cloud]
name = "isolated"
"#,
        )
        .unwrap();

        assert_eq!(
            config.get("extension", "index_url").as_deref(),
            Some("/srv/index.json")
        );
        assert_eq!(config.get("extension", "retries").as_deref(), Some("3"));
        assert_eq!(config.get("cloud", "name").as_deref(), Some("isolated"));
        assert!(config.get("cloud", "mirror_endpoint").is_none());
        assert!(config.get("missing", "key").is_none());
    }

    #[test]
    fn test_empty_value_is_absent() {
        let config = LocalConfig::from_toml_str("[extension]\nindex_url = \"\"\n").unwrap();
        assert!(config.get("extension", "index_url").is_none());
    }

    #[test]
    fn test_set_overrides_file_value() {
        let mut config = LocalConfig::from_toml_str("[cloud]\nname = \"public\"\n").unwrap();
        config.set("cloud", "name", "isolated");
        assert_eq!(config.get("cloud", "name").as_deref(), Some("isolated"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let config = LocalConfig::load(&path).unwrap();
        assert!(config.get("extension", "index_url").is_none());
        assert_eq!(config.source(), Some(path.as_path()));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[extension\nindex_url = ").unwrap();

        let err = LocalConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_env_key() {
        assert_eq!(env_key("extension", "index_url"), "EXTIDX_EXTENSION_INDEX_URL");
        assert_eq!(env_key("cloud", "mirror-endpoint"), "EXTIDX_CLOUD_MIRROR_ENDPOINT");
    }
}
