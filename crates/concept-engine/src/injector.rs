//! Instruction augmentation.
//!
//! Appends the framework preamble and one block per active concept to the
//! host's base instructions. Rebuilt from scratch every turn because the
//! host rebuilds its instructions every turn.

use concept_settings::InjectionSettings;

use crate::constants::{DEFAULT_HEADING, DEFAULT_SEPARATOR};
use crate::session::SnapshotEntry;

/// Preamble explaining the marker syntax to the model.
///
/// Written with a `<name>` placeholder so the preamble never resolves a
/// reference of its own.
pub fn default_preamble(prefix: &str, extension: &str) -> String {
    format!(
        "<concept-framework>\n\
         [[{prefix}:<name>]] is a provenance marker. It points at a shared concept \
         stored as <name>.{extension}.\n\
         Concept names carry meaning. Their documents hold the specifics agreed on \
         in earlier conversations.\n\
         </concept-framework>\n\
         \n\
         Treat your reading of intent as a hypothesis: words are lossy. Infer what \
         was meant, hold it loosely, and check when the stakes are real."
    )
}

/// Renders snapshots into augmented instructions.
#[derive(Debug, Clone)]
pub struct Injector {
    preamble: Option<String>,
    heading: String,
    separator: String,
}

impl Injector {
    /// Injector with an optional preamble and the default heading/separator.
    pub fn new(preamble: Option<String>) -> Self {
        Self {
            preamble,
            heading: DEFAULT_HEADING.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Injector configured from settings.
    pub fn from_settings(settings: &InjectionSettings, prefix: &str, extension: &str) -> Self {
        Self {
            preamble: settings
                .preamble_enabled
                .then(|| default_preamble(prefix, extension)),
            heading: settings.heading.clone(),
            separator: settings.separator.clone(),
        }
    }

    /// The configured preamble, if any.
    pub fn preamble(&self) -> Option<&str> {
        self.preamble.as_deref()
    }

    /// `base` followed by the preamble and one block per snapshot entry.
    ///
    /// Returns `base` unchanged when there is nothing to add.
    pub fn build(&self, base: &str, snapshot: &[SnapshotEntry]) -> String {
        let mut sections: Vec<String> = Vec::with_capacity(2);

        if let Some(preamble) = &self.preamble {
            sections.push(preamble.clone());
        }

        if !snapshot.is_empty() {
            let blocks: Vec<String> = snapshot
                .iter()
                .map(|entry| format!("## {}\n\n{}", entry.name, entry.content))
                .collect();
            sections.push(format!("{}\n\n{}", self.heading, blocks.join(&self.separator)));
        }

        if sections.is_empty() {
            return base.to_string();
        }
        format!("{base}\n\n{}", sections.join("\n\n"))
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ReferenceScanner;

    fn entry(name: &str, content: &str) -> SnapshotEntry {
        SnapshotEntry {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_nothing_to_add_returns_base() {
        assert_eq!(Injector::default().build("base", &[]), "base");
    }

    #[test]
    fn test_blocks_in_snapshot_order() {
        let out = Injector::default().build("base", &[entry("x", "X body"), entry("y", "Y body")]);
        assert_eq!(
            out,
            "base\n\n# Loaded Concepts\n\n## x\n\nX body\n\n---\n\n## y\n\nY body"
        );
    }

    #[test]
    fn test_preamble_without_concepts() {
        let injector = Injector::new(Some("PRE".to_string()));
        assert_eq!(injector.build("base", &[]), "base\n\nPRE");
    }

    #[test]
    fn test_preamble_before_concepts() {
        let injector = Injector::new(Some("PRE".to_string()));
        let out = injector.build("base", &[entry("x", "X")]);
        assert_eq!(out, "base\n\nPRE\n\n# Loaded Concepts\n\n## x\n\nX");
    }

    #[test]
    fn test_from_settings_respects_toggle_and_separator() {
        let mut settings = InjectionSettings::default();
        settings.preamble_enabled = false;
        settings.separator = "\n\n***\n\n".to_string();
        let injector = Injector::from_settings(&settings, "cf", "md");
        assert!(injector.preamble().is_none());
        let out = injector.build("b", &[entry("x", "X"), entry("y", "Y")]);
        assert!(out.contains("X\n\n***\n\n## y"));
    }

    #[test]
    fn test_default_preamble_has_no_resolvable_marker() {
        let preamble = default_preamble("cf", "md");
        assert!(preamble.contains("[[cf:<name>]]"));
        assert!(ReferenceScanner::default().scan(&preamble).is_empty());
    }

    #[test]
    fn test_build_is_pure() {
        let injector = Injector::new(Some("PRE".to_string()));
        let snapshot = [entry("x", "X")];
        assert_eq!(injector.build("b", &snapshot), injector.build("b", &snapshot));
    }
}
