//! [`TestIndex`]: an index document and config file in a temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use extidx_meta::{Candidate, INDEX_FORMAT_VERSION, IndexDocument, IndexExtensions};
use tempfile::TempDir;

/// A temporary directory holding `index.json` and, optionally, `config.toml`.
///
/// # Example
///
/// ```rust
/// use extidx_test_utils::{CandidateBuilder, TestIndex};
///
/// let index = TestIndex::new()
///     .with_extension("alias", vec![CandidateBuilder::new("alias", "0.5.2").build()]);
/// let path = index.write();
/// assert!(path.is_file());
/// ```
pub struct TestIndex {
    temp_dir: TempDir,
    extensions: IndexExtensions,
}

impl Default for TestIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl TestIndex {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            extensions: IndexExtensions::new(),
        }
    }

    /// Add (or replace) the candidates listed for `name`.
    pub fn with_extension(mut self, name: &str, candidates: Vec<Candidate>) -> Self {
        self.extensions.insert(name.to_string(), candidates);
        self
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn index_path(&self) -> PathBuf {
        self.root().join("index.json")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root().join("config")
    }

    pub fn document(&self) -> IndexDocument {
        IndexDocument {
            format_version: INDEX_FORMAT_VERSION.to_string(),
            extensions: self.extensions.clone(),
        }
    }

    /// Write `index.json` and return its path.
    ///
    /// # Panics
    /// Panics if serialization or the write fails.
    pub fn write(&self) -> PathBuf {
        let path = self.index_path();
        let content = serde_json::to_string_pretty(&self.document())
            .unwrap_or_else(|e| panic!("TestIndex::write: failed to serialize index: {e}"));
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestIndex::write: failed to write {}: {e}", path.display()));
        path
    }

    /// Write raw text as `index.json`, e.g. to test malformed documents.
    pub fn write_raw(&self, content: &str) -> PathBuf {
        let path = self.index_path();
        fs::write(&path, content).unwrap();
        path
    }

    /// Write `config/config.toml` and return the config directory.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        let dir = self.config_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), toml).unwrap();
        dir
    }
}
