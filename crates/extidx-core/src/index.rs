//! Index sources: where the candidate mapping comes from.
//!
//! The resolver never reads an index itself. It asks an [`IndexSource`] for
//! the name-to-candidates mapping and works on that in memory.

use std::fs;
use std::path::{Path, PathBuf};

use extidx_meta::{IndexDocument, IndexExtensions};

use crate::error::{Error, Result};
use crate::host::HostContext;

/// Config section holding extension settings.
pub const EXTENSION_SECTION: &str = "extension";

/// Config key overriding the index location.
pub const INDEX_URL_KEY: &str = "index_url";

/// Index location used when nothing else is configured.
///
/// [`FileIndexSource`] cannot read it; callers without a configured index
/// must supply one.
pub const DEFAULT_INDEX_URL: &str = "https://extidx.dev/index/v1/index.json";

/// Supplies the extension-name-to-candidates mapping.
pub trait IndexSource {
    /// Fetch the mapping. `index_url` overrides the configured location.
    fn extensions(
        &self,
        index_url: Option<&str>,
        host: &dyn HostContext,
    ) -> Result<IndexExtensions>;
}

/// Where the index should be read from.
///
/// Precedence: explicit `index_url`, then `[extension] index_url` from
/// local config, then `<mirror>/index.json` when the host has a mirror,
/// then [`DEFAULT_INDEX_URL`].
pub fn index_location(index_url: Option<&str>, host: &dyn HostContext) -> String {
    if let Some(url) = index_url.filter(|url| !url.is_empty()) {
        return url.to_string();
    }
    if let Some(url) = host.local_config(EXTENSION_SECTION, INDEX_URL_KEY) {
        return url;
    }
    if let Some(mirror) = host.mirror_endpoint() {
        return format!("{}/index.json", mirror.trim_end_matches('/'));
    }
    DEFAULT_INDEX_URL.to_string()
}

/// Reads a JSON index document from the local filesystem.
///
/// Accepts plain paths and `file://` URLs. Remote locations are rejected;
/// fetch the document out of band and point the source at the local copy.
#[derive(Debug, Clone, Default)]
pub struct FileIndexSource {
    base_dir: Option<PathBuf>,
}

impl FileIndexSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locations against `base_dir` instead of the working directory.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load and validate the document at `path`.
    pub fn load(path: &Path) -> Result<IndexDocument> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let document = IndexDocument::from_json(&content)?;
        tracing::debug!(
            ?path,
            extensions = document.extensions.len(),
            "Loaded extension index"
        );
        Ok(document)
    }

    fn local_path(&self, location: &str) -> Result<PathBuf> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Err(Error::Index {
                location: location.to_string(),
                message: "remote indexes are not supported; download the index and pass its \
                          path, or set `[extension] index_url` to a local file"
                    .to_string(),
            });
        }

        let path = PathBuf::from(location.strip_prefix("file://").unwrap_or(location));
        Ok(match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        })
    }
}

impl IndexSource for FileIndexSource {
    fn extensions(
        &self,
        index_url: Option<&str>,
        host: &dyn HostContext,
    ) -> Result<IndexExtensions> {
        let location = index_location(index_url, host);
        tracing::debug!(%location, "Reading extension index");
        let path = self.local_path(&location)?;
        Ok(Self::load(&path)?.into_extensions())
    }
}

/// An index held in memory. The location arguments are ignored.
#[derive(Debug, Clone, Default)]
pub struct StaticIndex {
    extensions: IndexExtensions,
}

impl StaticIndex {
    pub fn new(extensions: IndexExtensions) -> Self {
        Self { extensions }
    }
}

impl From<IndexDocument> for StaticIndex {
    fn from(document: IndexDocument) -> Self {
        Self::new(document.into_extensions())
    }
}

impl IndexSource for StaticIndex {
    fn extensions(&self, _index_url: Option<&str>, _host: &dyn HostContext) -> Result<IndexExtensions> {
        Ok(self.extensions.clone())
    }
}
