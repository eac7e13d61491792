//! Transitive reference resolution.
//!
//! A resolution pass scans a text for references, loads each referenced
//! document, and scans the loaded content for further references until the
//! closure is exhausted. Traversal is an explicit FIFO worklist: names the
//! text references directly are loaded before the names they pull in.
//!
//! Every discovered name lands in exactly one of [`Resolution::loaded`] or
//! [`Resolution::missing`]. A name is registered as loaded before its content
//! is scanned, so self-references and cycles hit the seen-guard and the pass
//! terminates after at most one load per distinct name.

use std::collections::{HashSet, VecDeque};

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, debug_span};

use crate::scanner::ReferenceScanner;
use crate::store::DocumentStore;

/// Accumulated outcome of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    loaded: IndexMap<String, String>,
    missing: IndexSet<String>,
}

impl Resolution {
    /// Empty accumulator for a fresh pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loaded documents, in discovery order.
    pub fn loaded(&self) -> &IndexMap<String, String> {
        &self.loaded
    }

    /// Names that could not be loaded, in discovery order.
    pub fn missing(&self) -> &IndexSet<String> {
        &self.missing
    }

    /// Loaded names, in discovery order.
    pub fn loaded_names(&self) -> Vec<&str> {
        self.loaded.keys().map(String::as_str).collect()
    }

    /// Whether `name` has already been settled in this pass.
    pub fn has_seen(&self, name: &str) -> bool {
        self.loaded.contains_key(name) || self.missing.contains(name)
    }

    /// `true` if nothing was discovered.
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty() && self.missing.is_empty()
    }

    /// Split into `(loaded, missing)`.
    pub fn into_parts(self) -> (IndexMap<String, String>, IndexSet<String>) {
        (self.loaded, self.missing)
    }
}

/// Expands references against a [`DocumentStore`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a dyn DocumentStore,
    scanner: &'a ReferenceScanner,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over `store` using `scanner`'s marker syntax.
    pub fn new(store: &'a dyn DocumentStore, scanner: &'a ReferenceScanner) -> Self {
        Self { store, scanner }
    }

    /// Run a fresh pass over `text`.
    pub fn resolve(&self, text: &str) -> Resolution {
        let mut resolution = Resolution::new();
        self.resolve_into(text, &mut resolution);
        resolution
    }

    /// Continue a pass: names already in `resolution` are not re-fetched.
    pub fn resolve_into(&self, text: &str, resolution: &mut Resolution) {
        let _span = debug_span!("resolve", prefix = self.scanner.prefix()).entered();

        let mut pending: VecDeque<String> = VecDeque::new();
        let mut queued: HashSet<String> = HashSet::new();
        self.enqueue(text, resolution, &mut pending, &mut queued);

        while let Some(name) = pending.pop_front() {
            match self.store.load(&name) {
                None => {
                    debug!(name = %name, "concept missing");
                    let _ = resolution.missing.insert(name);
                }
                Some(content) => {
                    let references = self.scanner.scan(&content);
                    let _ = resolution.loaded.insert(name, content);
                    for reference in references {
                        if !resolution.has_seen(&reference) && queued.insert(reference.clone()) {
                            pending.push_back(reference);
                        }
                    }
                }
            }
        }

        debug!(
            loaded = resolution.loaded.len(),
            missing = resolution.missing.len(),
            "resolution pass complete"
        );
    }

    fn enqueue(
        &self,
        text: &str,
        resolution: &Resolution,
        pending: &mut VecDeque<String>,
        queued: &mut HashSet<String>,
    ) {
        for name in self.scanner.scan(text) {
            if !resolution.has_seen(&name) && queued.insert(name.clone()) {
                pending.push_back(name);
            }
        }
    }
}
