//! [`CandidateBuilder`] for index records.

use std::collections::BTreeMap;

use extidx_meta::candidate::DETAILS_NAMESPACE;
use extidx_meta::{Candidate, ExtensionMetadata};
use serde_json::json;

/// Host used in generated download URLs.
pub const DOWNLOAD_HOST: &str = "https://public.extidx.test/cli-extensions";

/// Builds a [`Candidate`] with sensible defaults: a universal
/// `py3-none-any` wheel, a download URL and a digest derived from the
/// filename.
///
/// # Example
///
/// ```rust
/// use extidx_test_utils::CandidateBuilder;
///
/// let candidate = CandidateBuilder::new("alias", "0.5.2").build();
/// assert_eq!(candidate.filename, "alias-0.5.2-py3-none-any.whl");
/// assert!(candidate.is_universal());
/// ```
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    name: String,
    version: String,
    python_tag: String,
    abi_tag: String,
    platform_tag: String,
    filename: Option<String>,
    download_url: Option<Option<String>>,
    digest: Option<Option<String>>,
    metadata_name: Option<String>,
    min_host: Option<String>,
    max_host: Option<String>,
    home_page: Option<String>,
}

impl CandidateBuilder {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            python_tag: "py3".to_string(),
            abi_tag: "none".to_string(),
            platform_tag: "any".to_string(),
            filename: None,
            download_url: None,
            digest: None,
            metadata_name: None,
            min_host: None,
            max_host: None,
            home_page: None,
        }
    }

    /// Make the wheel platform specific.
    pub fn platform(mut self, python_tag: &str, abi_tag: &str, platform_tag: &str) -> Self {
        self.python_tag = python_tag.to_string();
        self.abi_tag = abi_tag.to_string();
        self.platform_tag = platform_tag.to_string();
        self
    }

    /// Use `filename` verbatim instead of composing one from the tags.
    pub fn filename(mut self, filename: &str) -> Self {
        self.filename = Some(filename.to_string());
        self
    }

    pub fn download_url(mut self, url: &str) -> Self {
        self.download_url = Some(Some(url.to_string()));
        self
    }

    pub fn no_download_url(mut self) -> Self {
        self.download_url = Some(None);
        self
    }

    pub fn digest(mut self, digest: &str) -> Self {
        self.digest = Some(Some(digest.to_string()));
        self
    }

    pub fn no_digest(mut self) -> Self {
        self.digest = Some(None);
        self
    }

    /// Set `metadata.name` (used for per-extension minimum versions).
    pub fn metadata_name(mut self, name: &str) -> Self {
        self.metadata_name = Some(name.to_string());
        self
    }

    pub fn min_host(mut self, version: &str) -> Self {
        self.min_host = Some(version.to_string());
        self
    }

    pub fn max_host(mut self, version: &str) -> Self {
        self.max_host = Some(version.to_string());
        self
    }

    pub fn home_page(mut self, url: &str) -> Self {
        self.home_page = Some(url.to_string());
        self
    }

    pub fn build(self) -> Candidate {
        let filename = self.filename.unwrap_or_else(|| {
            format!(
                "{}-{}-{}-{}-{}.whl",
                self.name.replace('-', "_"),
                self.version,
                self.python_tag,
                self.abi_tag,
                self.platform_tag
            )
        });

        let mut extensions = BTreeMap::new();
        if let Some(home) = &self.home_page {
            extensions.insert(
                DETAILS_NAMESPACE.to_string(),
                json!({ "project_urls": { "Home": home } }),
            );
        }

        Candidate {
            download_url: self
                .download_url
                .unwrap_or_else(|| Some(format!("{DOWNLOAD_HOST}/{filename}"))),
            sha256_digest: self
                .digest
                .unwrap_or_else(|| Some(format!("sha256-{filename}"))),
            metadata: ExtensionMetadata {
                version: self.version,
                name: self.metadata_name,
                min_host_version: self.min_host,
                max_host_version: self.max_host,
                extensions,
                ..Default::default()
            },
            filename,
        }
    }
}
