//! Shared constants for the concept engine.

/// Default marker prefix: references look like `[[cf:name]]`.
pub const DEFAULT_MARKER_PREFIX: &str = "cf";

/// Default concept file extension (without the dot).
pub const DEFAULT_EXTENSION: &str = "md";

/// Characters allowed in a concept name, as a regex character class.
pub const NAME_CHARSET: &str = "[A-Za-z0-9_-]";

/// Status-display label for manually toggled concepts.
pub const STATUS_LABEL: &str = "concepts";

/// Option prefix for an active concept in the toggle picker.
pub const ACTIVE_INDICATOR: &str = "● ";

/// Option prefix for an inactive concept in the toggle picker.
pub const INACTIVE_INDICATOR: &str = "○ ";

/// Prompt shown by the toggle picker.
pub const TOGGLE_PROMPT: &str = "Toggle concept:";

/// Default heading above the injected concept blocks.
pub const DEFAULT_HEADING: &str = "# Loaded Concepts";

/// Default separator between injected concept blocks.
pub const DEFAULT_SEPARATOR: &str = "\n\n---\n\n";
