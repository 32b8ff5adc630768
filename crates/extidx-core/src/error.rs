//! Error types for extidx-core

use std::path::PathBuf;

/// Result type for extidx-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving an extension package.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Nothing suitable to install. The message says why.
    #[error("{0}")]
    NoCandidates(String),

    /// Index data is structurally missing something it should carry.
    #[error("{0}")]
    Configuration(String),

    /// Malformed index data, including unparseable versions.
    #[error(transparent)]
    Meta(#[from] extidx_meta::Error),

    /// The index could not be located or loaded.
    #[error("failed to load index from {location}: {message}")]
    Index { location: String, message: String },

    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn no_extension(name: &str) -> Self {
        Self::NoCandidates(format!("No extension found with name '{name}'"))
    }

    pub(crate) fn no_suitable() -> Self {
        Self::NoCandidates("No suitable extensions found.".to_string())
    }

    pub(crate) fn version_not_found(version: &str) -> Self {
        Self::NoCandidates(format!("Extension with version {version} not found"))
    }

    pub(crate) fn no_download_url() -> Self {
        Self::NoCandidates("No download url found.".to_string())
    }

    /// Whether this is one of the "nothing to install" outcomes.
    pub fn is_no_candidates(&self) -> bool {
        matches!(self, Self::NoCandidates(_))
    }
}
