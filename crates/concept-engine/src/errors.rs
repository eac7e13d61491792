//! Error types for the concept engine.
//!
//! Store errors never leave the store: [`DocumentStore::load`] folds every
//! variant into "not found". They exist so the fold can be logged with the
//! real cause.
//!
//! [`DocumentStore::load`]: crate::store::DocumentStore::load

use std::path::PathBuf;

/// Errors raised inside the concept engine.
#[derive(Debug, thiserror::Error)]
pub enum ConceptError {
    /// Name contains characters outside the reference-name charset.
    #[error("invalid concept name: {0:?}")]
    InvalidName(String),

    /// No document backs this name.
    #[error("concept not found: {0}")]
    NotFound(String),

    /// The document exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The marker pattern could not be compiled.
    #[error("invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Settings rejected by validation.
    #[error(transparent)]
    Settings(#[from] concept_settings::SettingsError),
}
