//! Shared test utilities for the extidx workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`candidate`] — [`CandidateBuilder`] for index records
//! - [`index`] — [`TestIndex`] on-disk index and config fixtures

pub mod candidate;
pub mod index;

pub use candidate::CandidateBuilder;
pub use index::TestIndex;
