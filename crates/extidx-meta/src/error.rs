//! Error types for extidx-meta

/// Result type for extidx-meta operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading index data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A version string does not follow the supported version grammar.
    #[error("invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// The index document declares a format version this crate cannot read.
    #[error("unsupported index format version '{found}' (expected '{expected}')")]
    UnsupportedFormat { found: String, expected: String },

    /// The index document is not valid JSON or does not match the schema.
    #[error("failed to parse index document: {0}")]
    IndexParse(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_version(version: &str, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.to_string(),
            reason: reason.into(),
        }
    }
}
