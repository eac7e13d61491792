//! Per-session concept accumulation.
//!
//! A [`SessionContext`] is created when a session starts and dropped when
//! it ends. It remembers every concept that was resolved or manually
//! selected, in first-seen order, and never evicts on its own. Content is
//! not cached: [`SessionContext::snapshot`] re-reads the store every time, so
//! edits made mid-session show up on the next turn.

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::store::DocumentStore;

/// How a concept first entered the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddedVia {
    /// Discovered by resolving a reference marker.
    Reference,
    /// Selected through the toggle picker.
    Manual,
}

/// One concept's current content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// Concept name.
    pub name: String,
    /// Content as read at snapshot time.
    pub content: String,
}

/// Ordered, duplicate-free set of concepts active in one session.
#[derive(Debug)]
pub struct SessionContext {
    id: String,
    active: IndexMap<String, AddedVia>,
}

impl SessionContext {
    /// Start a new, empty session.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            active: IndexMap::new(),
        }
    }

    /// Session identifier (used in log fields).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Merge names discovered by resolution. Returns the newly added names.
    pub fn merge_auto_loaded<I, S>(&mut self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.merge(names, AddedVia::Reference)
    }

    /// Merge manually selected names. Returns the newly added names.
    pub fn merge_manual<I, S>(&mut self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.merge(names, AddedVia::Manual)
    }

    fn merge<I, S>(&mut self, names: I, via: AddedVia) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = Vec::new();
        for name in names {
            let name = name.into();
            if !self.active.contains_key(&name) {
                let _ = self.active.insert(name.clone(), via);
                added.push(name);
            }
        }
        if !added.is_empty() {
            debug!(session_id = %self.id, ?via, added = ?added, "concepts added to session");
        }
        added
    }

    /// Whether `name` is active in this session.
    pub fn contains(&self, name: &str) -> bool {
        self.active.contains_key(name)
    }

    /// Number of active concepts.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// `true` if no concept has been added yet.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Active names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.active.keys().map(String::as_str)
    }

    /// Active names with how each was added, in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, AddedVia)> {
        self.active.iter().map(|(name, via)| (name.as_str(), *via))
    }

    /// Re-read every active concept from `store`, in first-seen order.
    ///
    /// Concepts whose document can no longer be read are left out of the
    /// snapshot but stay in the session.
    pub fn snapshot(&self, store: &dyn DocumentStore) -> Vec<SnapshotEntry> {
        self.active
            .keys()
            .filter_map(|name| match store.load(name) {
                Some(content) => Some(SnapshotEntry {
                    name: name.clone(),
                    content,
                }),
                None => {
                    debug!(session_id = %self.id, name = %name, "active concept no longer readable");
                    None
                }
            })
            .collect()
    }

    /// Forget every active concept.
    pub fn reset(&mut self) {
        info!(session_id = %self.id, cleared = self.active.len(), "session concepts reset");
        self.active.clear();
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;

    fn names(session: &SessionContext) -> Vec<&str> {
        session.names().collect()
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionContext::new();
        assert!(session.is_empty());
        assert!(!session.id().is_empty());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        assert_ne!(SessionContext::new().id(), SessionContext::new().id());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut session = SessionContext::new();
        let _ = session.merge_auto_loaded(["x", "y"]);
        let added = session.merge_auto_loaded(["x"]);
        assert!(added.is_empty());
        assert_eq!(names(&session), vec!["x", "y"]);
    }

    #[test]
    fn test_merge_preserves_first_seen_order() {
        let mut session = SessionContext::new();
        for name in ["x", "y", "x", "z"] {
            let _ = session.merge_auto_loaded([name]);
        }
        assert_eq!(names(&session), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_merge_returns_new_names_only() {
        let mut session = SessionContext::new();
        let _ = session.merge_auto_loaded(["a"]);
        let added = session.merge_manual(["a", "b"]);
        assert_eq!(added, vec!["b"]);
    }

    #[test]
    fn test_added_via_keeps_first_source() {
        let mut session = SessionContext::new();
        let _ = session.merge_manual(["m"]);
        let _ = session.merge_auto_loaded(["m", "r"]);
        let entries: Vec<(&str, AddedVia)> = session.entries().collect();
        assert_eq!(
            entries,
            vec![("m", AddedVia::Manual), ("r", AddedVia::Reference)]
        );
    }

    #[test]
    fn test_snapshot_reads_current_content() {
        let store = MemoryDocumentStore::from_documents([("n", "C1")]);
        let mut session = SessionContext::new();
        let _ = session.merge_auto_loaded(["n"]);
        assert_eq!(session.snapshot(&store)[0].content, "C1");

        store.insert("n", "C2");
        assert_eq!(session.snapshot(&store)[0].content, "C2");
    }

    #[test]
    fn test_snapshot_omits_vanished_without_dropping_membership() {
        let store = MemoryDocumentStore::from_documents([("a", "A"), ("b", "B")]);
        let mut session = SessionContext::new();
        let _ = session.merge_auto_loaded(["a", "b"]);
        let _ = store.remove("a");

        let snapshot = session.snapshot(&store);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "b");
        assert!(session.contains("a"));

        store.insert("a", "A again");
        let names: Vec<String> = session.snapshot(&store).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_reset_clears() {
        let mut session = SessionContext::new();
        let _ = session.merge_auto_loaded(["a"]);
        session.reset();
        assert!(session.is_empty());
        let _ = session.merge_auto_loaded(["b"]);
        assert_eq!(names(&session), vec!["b"]);
    }
}
