//! `extidx resolve`

use colored::Colorize;
use extidx_core::{FileIndexSource, Host, ResolveRequest, Resolver};
use serde::Serialize;

use crate::error::Result;

/// JSON shape printed by `resolve --json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveOutput<'a> {
    name: &'a str,
    download_url: &'a str,
    sha256_digest: Option<&'a str>,
}

/// Handle `extidx resolve <name> [--current V] [--target-version V] [--index URL] [--json]`
pub fn run_resolve(
    host: &Host,
    name: &str,
    current: Option<&str>,
    target: Option<&str>,
    index: Option<&str>,
    json: bool,
) -> Result<()> {
    super::require_name(name)?;

    let mut request = ResolveRequest::new(name);
    if let Some(current) = current {
        request = request.with_current_version(current);
    }
    if let Some(target) = target {
        request = request.with_target_version(target);
    }
    if let Some(index) = index {
        request = request.with_index_url(index);
    }

    let source = FileIndexSource::new();
    let resolution = Resolver::new(&source, host).resolve_download(&request)?;

    if json {
        let output = ResolveOutput {
            name,
            download_url: &resolution.download_url,
            sha256_digest: resolution.digest.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} Resolved '{}'", "=>".blue().bold(), name.cyan());
    println!("   {} {}", "URL:".dimmed(), resolution.download_url);
    match &resolution.digest {
        Some(digest) => println!("   {} {}", "SHA256:".dimmed(), digest),
        None => println!("   {} {}", "SHA256:".dimmed(), "not listed".yellow()),
    }
    Ok(())
}
