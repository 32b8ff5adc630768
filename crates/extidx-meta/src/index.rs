//! The index document: a catalog mapping extension names to candidates.
//!
//! ```json
//! {
//!   "formatVersion": "1",
//!   "extensions": {
//!     "image-copy": [
//!       {
//!         "filename": "image_copy-0.2.13-py3-none-any.whl",
//!         "downloadUrl": "https://example.blob/image_copy-0.2.13-py3-none-any.whl",
//!         "sha256Digest": "...",
//!         "metadata": { "version": "0.2.13" }
//!       }
//!     ]
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::INDEX_FORMAT_VERSION;
use crate::candidate::Candidate;
use crate::error::{Error, Result};

/// Extension name to candidates, in document order.
pub type IndexExtensions = BTreeMap<String, Vec<Candidate>>;

/// A parsed index document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    pub format_version: String,
    #[serde(default)]
    pub extensions: IndexExtensions,
}

impl IndexDocument {
    /// Parse and validate an index document from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(content)?;
        document.validate()?;
        Ok(document)
    }

    /// Reject documents whose format version this crate cannot read.
    pub fn validate(&self) -> Result<()> {
        if self.format_version != INDEX_FORMAT_VERSION {
            return Err(Error::UnsupportedFormat {
                found: self.format_version.clone(),
                expected: INDEX_FORMAT_VERSION.to_string(),
            });
        }
        Ok(())
    }

    /// Candidates for `name`, looked up verbatim.
    pub fn candidates(&self, name: &str) -> &[Candidate] {
        self.extensions.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_extensions(self) -> IndexExtensions {
        self.extensions
    }
}
