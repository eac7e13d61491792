//! Concept document stores.
//!
//! A store maps a concept name to its current content. Any failure to read a
//! document is reported as "not found": the store does no retries and keeps
//! no negative cache, so a transient failure only affects the current pass.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::errors::ConceptError;
use crate::scanner::is_valid_name;

/// Read-only name → content lookup.
pub trait DocumentStore: Send + Sync + fmt::Debug {
    /// Current content of `name`, or `None` if it cannot be read.
    fn load(&self, name: &str) -> Option<String>;

    /// All resolvable names, sorted. Empty if enumeration fails.
    fn list_available(&self) -> Vec<String>;

    /// Human-readable location of the store, for notices.
    fn describe(&self) -> String;

    /// How a document is referred to in user-facing messages.
    fn document_label(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Flat directory of `<name>.<extension>` files.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
    extension: String,
}

impl FsDocumentStore {
    /// Create a store rooted at `root` for files ending in `.<extension>`.
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Directory this store reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File extension (without the dot).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path backing `name`. Rejects names outside the reference charset.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, ConceptError> {
        if !is_valid_name(name) {
            return Err(ConceptError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.{}", self.extension)))
    }

    /// Read `name`, keeping the failure cause.
    pub fn read(&self, name: &str) -> Result<String, ConceptError> {
        let path = self.path_for(name)?;
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConceptError::NotFound(name.to_string())
            } else {
                ConceptError::Io { path, source }
            }
        })
    }

    fn name_of(&self, path: &Path) -> Option<String> {
        if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        is_valid_name(stem).then(|| stem.to_string())
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, name: &str) -> Option<String> {
        match self.read(name) {
            Ok(content) => Some(content),
            Err(error) => {
                debug!(name, %error, "concept unavailable");
                None
            }
        }
    }

    fn list_available(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(dir = %self.root.display(), %error, "failed to read concepts directory");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| self.name_of(&path))
            .collect();
        names.sort();
        names
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn document_label(&self, name: &str) -> String {
        format!("{name}.{}", self.extension)
    }
}

/// In-process documents (bundled assets, tests).
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<BTreeMap<String, String>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from `(name, content)` pairs.
    pub fn from_documents<I, N, C>(documents: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        let documents = documents
            .into_iter()
            .map(|(name, content)| (name.into(), content.into()))
            .collect();
        Self {
            documents: RwLock::new(documents),
        }
    }

    /// Add or replace a document.
    pub fn insert(&self, name: impl Into<String>, content: impl Into<String>) {
        let _ = self.documents.write().insert(name.into(), content.into());
    }

    /// Remove a document. Returns `true` if it existed.
    pub fn remove(&self, name: &str) -> bool {
        self.documents.write().remove(name).is_some()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn load(&self, name: &str) -> Option<String> {
        self.documents.read().get(name).cloned()
    }

    fn list_available(&self) -> Vec<String> {
        self.documents.read().keys().cloned().collect()
    }

    fn describe(&self) -> String {
        "bundled concepts".to_string()
    }
}
