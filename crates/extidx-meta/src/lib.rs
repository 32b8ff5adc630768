//! Data model for extension package indexes.
//!
//! This crate provides the index document and candidate record types, wheel
//! filename tag parsing, and the PEP 440-style version ordering used when
//! ranking candidates.

pub mod candidate;
pub mod error;
pub mod index;
pub mod version;
pub mod wheel;

/// The only index document format version this crate understands.
pub const INDEX_FORMAT_VERSION: &str = "1";

pub use candidate::{Candidate, ExtensionMetadata};
pub use error::{Error, Result};
pub use index::{IndexDocument, IndexExtensions};
pub use version::ExtVersion;
pub use wheel::WheelInfo;
