//! Manual concept selection.
//!
//! The user can switch concepts on without mentioning them in a prompt.
//! Selected names feed the session on the next turn. Switching a concept
//! off only changes the selection: content already accumulated in the
//! session stays there until the session ends.

use indexmap::IndexSet;

use concept_core::StatusText;

use crate::constants::{ACTIVE_INDICATOR, INACTIVE_INDICATOR, STATUS_LABEL};

/// Result of flipping one concept's selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The concept is now selected.
    Activated(String),
    /// The concept is no longer selected.
    Deactivated(String),
}

impl ToggleOutcome {
    /// Concept the outcome refers to.
    pub fn name(&self) -> &str {
        match self {
            Self::Activated(name) | Self::Deactivated(name) => name,
        }
    }

    /// User-facing notice for this outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Activated(name) => format!("Activated: {name}"),
            Self::Deactivated(name) => format!("Deactivated: {name}"),
        }
    }
}

/// The manually toggled set, in selection order.
#[derive(Debug, Clone, Default)]
pub struct ManualToggles {
    selected: IndexSet<String>,
}

impl ManualToggles {
    /// No concepts selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is currently selected.
    pub fn is_active(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    /// Flip `name`'s selection.
    pub fn toggle(&mut self, name: &str) -> ToggleOutcome {
        if self.selected.shift_remove(name) {
            ToggleOutcome::Deactivated(name.to_string())
        } else {
            let _ = self.selected.insert(name.to_string());
            ToggleOutcome::Activated(name.to_string())
        }
    }

    /// Selected names in selection order.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Picker options for `available`, each prefixed with its state indicator.
    pub fn options(&self, available: &[String]) -> Vec<String> {
        available
            .iter()
            .map(|name| {
                let indicator = if self.is_active(name) {
                    ACTIVE_INDICATOR
                } else {
                    INACTIVE_INDICATOR
                };
                format!("{indicator}{name}")
            })
            .collect()
    }

    /// Status-display text: `None` clears the status.
    pub fn status_text(&self) -> Option<StatusText> {
        if self.selected.is_empty() {
            return None;
        }
        let mut names: Vec<&str> = self.selected().collect();
        names.sort_unstable();
        Some(StatusText::success(format!(
            "{STATUS_LABEL}: {}",
            names.join(", ")
        )))
    }
}

/// Recover the concept name from a picker option.
pub fn parse_option(option: &str) -> &str {
    option
        .strip_prefix(ACTIVE_INDICATOR)
        .or_else(|| option.strip_prefix(INACTIVE_INDICATOR))
        .unwrap_or(option)
}

#[cfg(test)]
mod tests {
    use concept_core::StatusStyle;

    use super::*;

    fn available(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut toggles = ManualToggles::new();
        assert_eq!(toggles.toggle("a"), ToggleOutcome::Activated("a".to_string()));
        assert!(toggles.is_active("a"));
        assert_eq!(toggles.toggle("a"), ToggleOutcome::Deactivated("a".to_string()));
        assert!(!toggles.is_active("a"));
    }

    #[test]
    fn test_selection_order_kept_after_removal() {
        let mut toggles = ManualToggles::new();
        for name in ["c", "a", "b"] {
            let _ = toggles.toggle(name);
        }
        let _ = toggles.toggle("a");
        assert_eq!(toggles.selected().collect::<Vec<_>>(), vec!["c", "b"]);
    }

    #[test]
    fn test_options_show_indicators() {
        let mut toggles = ManualToggles::new();
        let _ = toggles.toggle("beta");
        let options = toggles.options(&available(&["alpha", "beta"]));
        assert_eq!(options, vec!["○ alpha", "● beta"]);
    }

    #[test]
    fn test_parse_option_strips_indicator() {
        assert_eq!(parse_option("● beta"), "beta");
        assert_eq!(parse_option("○ alpha"), "alpha");
        assert_eq!(parse_option("plain"), "plain");
    }

    #[test]
    fn test_status_text_sorted_and_cleared() {
        let mut toggles = ManualToggles::new();
        assert!(toggles.status_text().is_none());

        let _ = toggles.toggle("zeta");
        let _ = toggles.toggle("alpha");
        let status = toggles.status_text().unwrap();
        assert_eq!(status.text, "concepts: alpha, zeta");
        assert_eq!(status.style, StatusStyle::Success);

        let _ = toggles.toggle("zeta");
        let _ = toggles.toggle("alpha");
        assert!(toggles.status_text().is_none());
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(ToggleOutcome::Activated("a".into()).message(), "Activated: a");
        assert_eq!(ToggleOutcome::Deactivated("a".into()).message(), "Deactivated: a");
        assert_eq!(ToggleOutcome::Deactivated("a".into()).name(), "a");
    }
}
