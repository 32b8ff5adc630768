//! `extidx versions`

use colored::Colorize;
use extidx_core::{AvailableVersion, FileIndexSource, Host, Resolver};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VersionOutput<'a> {
    version: &'a str,
    filename: &'a str,
    universal: bool,
    compatible: bool,
    download_url: Option<&'a str>,
}

impl<'a> From<&'a AvailableVersion> for VersionOutput<'a> {
    fn from(v: &'a AvailableVersion) -> Self {
        Self {
            version: &v.version,
            filename: &v.filename,
            universal: v.universal,
            compatible: v.compatible,
            download_url: v.download_url.as_deref(),
        }
    }
}

/// Handle `extidx versions <name> [--index URL] [--json]`
pub fn run_versions(host: &Host, name: &str, index: Option<&str>, json: bool) -> Result<()> {
    super::require_name(name)?;

    let source = FileIndexSource::new();
    let versions = Resolver::new(&source, host).available_versions(name, index)?;

    if json {
        let output: Vec<VersionOutput<'_>> = versions.iter().map(VersionOutput::from).collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} Releases of '{}'", "=>".blue().bold(), name.cyan());
    for v in &versions {
        let status = match (v.universal, v.compatible) {
            (true, true) => "installable".green(),
            (false, _) => "platform specific".yellow(),
            (true, false) => "incompatible".red(),
        };
        println!("   {:<12} {:<18} {}", v.version, status, v.filename.dimmed());
    }
    println!();
    println!("Total: {} releases", versions.len());
    Ok(())
}
