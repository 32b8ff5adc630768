//! Command implementations for extidx-cli

pub mod project_url;
pub mod resolve;
pub mod versions;

pub use project_url::run_project_url;
pub use resolve::run_resolve;
pub use versions::run_versions;

use crate::error::{CliError, Result};

/// Reject blank extension names before touching the index.
fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CliError::user("Extension name must not be empty"));
    }
    Ok(())
}
