//! `extidx project-url`

use extidx_core::{FileIndexSource, Host, Resolver};

use crate::error::Result;

/// Handle `extidx project-url <name>`
///
/// Prints only the URL so the output can be piped.
pub fn run_project_url(host: &Host, name: &str) -> Result<()> {
    super::require_name(name)?;

    let source = FileIndexSource::new();
    let url = Resolver::new(&source, host).resolve_project_url(name)?;
    println!("{url}");
    Ok(())
}
