//! Host detection for CLI commands
//!
//! Builds the [`Host`] that commands resolve against from global flags,
//! local configuration and the build's own version.

use extidx_core::{Host, HostContext, LocalConfig};
use extidx_meta::ExtVersion;

use crate::cli::HostArgs;
use crate::error::Result;

/// Config section and key holding the host version.
const CORE_SECTION: &str = "core";
const HOST_VERSION_KEY: &str = "host_version";

/// Load local configuration: `--config` if given, otherwise the user config.
pub fn load_config(args: &HostArgs) -> Result<LocalConfig> {
    let mut config = match &args.config {
        Some(path) => LocalConfig::load(path)?.with_env_overrides(),
        None => LocalConfig::discover()?,
    };
    if let Some(mirror) = &args.mirror {
        config.set("cloud", "mirror_endpoint", mirror.as_str());
    }
    Ok(config)
}

/// The host version: `--host-version`, then `[core] host_version`, then
/// this build's version.
pub fn host_version(args: &HostArgs, config: &LocalConfig) -> Result<ExtVersion> {
    let raw = args
        .host_version
        .clone()
        .or_else(|| config.get(CORE_SECTION, HOST_VERSION_KEY))
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    Ok(ExtVersion::parse(&raw)?)
}

/// Build the host for this invocation.
pub fn detect_host(args: &HostArgs) -> Result<Host> {
    let config = load_config(args)?;
    let version = host_version(args, &config)?;
    let host = Host::from_config(version, config);
    tracing::debug!(
        host_version = %host.host_version(),
        cloud = %host.cloud().name,
        "Detected host"
    );
    Ok(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(config: Option<std::path::PathBuf>) -> HostArgs {
        HostArgs {
            config,
            host_version: None,
            mirror: None,
        }
    }

    #[test]
    fn test_host_version_from_flag() {
        let mut args = args(None);
        args.host_version = Some("2.61.0".into());
        let version = host_version(&args, &LocalConfig::empty()).unwrap();
        assert_eq!(version.to_string(), "2.61.0");
    }

    #[test]
    fn test_host_version_from_config() {
        let config = LocalConfig::from_toml_str("[core]\nhost_version = \"2.55.0\"\n").unwrap();
        let version = host_version(&args(None), &config).unwrap();
        assert_eq!(version.to_string(), "2.55.0");
    }

    #[test]
    fn test_host_version_defaults_to_build() {
        let version = host_version(&args(None), &LocalConfig::empty()).unwrap();
        assert_eq!(version.to_string(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_mirror_flag_overrides_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[cloud]\nname = \"isolated\"\nmirror_endpoint = \"https://old.internal\"\n",
        )
        .unwrap();

        let mut args = args(Some(path));
        args.mirror = Some("https://new.internal".into());
        args.host_version = Some("1.0.0".into());
        let host = detect_host(&args).unwrap();

        assert_eq!(host.cloud().name, "isolated");
        assert_eq!(host.mirror_endpoint(), Some("https://new.internal"));
    }

    #[test]
    fn test_invalid_host_version() {
        let mut args = args(None);
        args.host_version = Some("current".into());
        assert!(host_version(&args, &LocalConfig::empty()).is_err());
    }
}
