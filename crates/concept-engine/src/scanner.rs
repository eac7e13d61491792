//! Reference marker extraction.
//!
//! Finds `[[<prefix>:name]]` markers in a text blob. Malformed markers
//! (bad characters, missing brackets, wrong prefix) simply don't match.

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::constants::{DEFAULT_MARKER_PREFIX, NAME_CHARSET};
use crate::errors::ConceptError;

static DEFAULT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&marker_pattern(DEFAULT_MARKER_PREFIX)).unwrap());

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{NAME_CHARSET}+$")).unwrap());

fn marker_pattern(prefix: &str) -> String {
    format!(r"\[\[{}:({NAME_CHARSET}+)\]\]", regex::escape(prefix))
}

/// Whether `name` is a well-formed concept name.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Extracts concept references from text.
#[derive(Debug, Clone)]
pub struct ReferenceScanner {
    prefix: String,
    pattern: Regex,
}

impl ReferenceScanner {
    /// Build a scanner for `[[<prefix>:name]]` markers.
    pub fn new(prefix: &str) -> Result<Self, ConceptError> {
        if prefix == DEFAULT_MARKER_PREFIX {
            return Ok(Self::default());
        }
        Ok(Self {
            prefix: prefix.to_string(),
            pattern: Regex::new(&marker_pattern(prefix))?,
        })
    }

    /// The marker prefix this scanner matches.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Render a marker for `name` in this scanner's syntax.
    pub fn marker(&self, name: &str) -> String {
        format!("[[{}:{name}]]", self.prefix)
    }

    /// Unique referenced names, in order of first occurrence.
    pub fn scan(&self, text: &str) -> IndexSet<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for ReferenceScanner {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_MARKER_PREFIX.to_string(),
            pattern: DEFAULT_PATTERN.clone(),
        }
    }
}
