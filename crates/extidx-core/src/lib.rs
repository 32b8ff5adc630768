//! Extension package resolution.
//!
//! Given an extension name, this crate picks the single artifact to install
//! from an index of published releases and returns its download URL and
//! digest. The index itself comes from an [`IndexSource`]; facts about the
//! running host come from a [`HostContext`].
//!
//! ```
//! use extidx_core::{Host, ResolveRequest, Resolver, StaticIndex};
//! use extidx_meta::{ExtVersion, IndexDocument};
//!
//! let document = IndexDocument::from_json(r#"{
//!     "formatVersion": "1",
//!     "extensions": {
//!         "alias": [{
//!             "filename": "alias-0.5.2-py2.py3-none-any.whl",
//!             "downloadUrl": "https://example.blob/alias-0.5.2-py2.py3-none-any.whl",
//!             "sha256Digest": "c4a9",
//!             "metadata": { "version": "0.5.2" }
//!         }]
//!     }
//! }"#).unwrap();
//!
//! let index = StaticIndex::from(document);
//! let host = Host::new(ExtVersion::parse("2.60.0").unwrap());
//! let resolution = Resolver::new(&index, &host)
//!     .resolve_download(&ResolveRequest::new("alias"))
//!     .unwrap();
//! assert_eq!(resolution.digest.as_deref(), Some("c4a9"));
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod index;
pub mod resolver;

pub use config::LocalConfig;
pub use error::{Error, Result};
pub use host::{Cloud, CloudEndpoints, Compatibility, Host, HostContext};
pub use index::{FileIndexSource, IndexSource, StaticIndex, index_location};
pub use resolver::{
    AvailableVersion, CandidateFilter, Resolution, ResolveRequest, Resolver,
    mirror_download_url,
};
