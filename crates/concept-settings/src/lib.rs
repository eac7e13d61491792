//! # concept-settings
//!
//! Layered configuration for the concept loader.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`ConceptSettings::default()`]
//! 2. **User file**: `~/.concepts/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `CONCEPTS_*` overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use concept_settings::get_settings;
//!
//! let settings = get_settings();
//! println!("concepts dir: {}", settings.store.dir);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::sync::OnceLock;

static SETTINGS: OnceLock<ConceptSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// Loaded on first call; falls back to compiled defaults if loading fails.
pub fn get_settings() -> &'static ConceptSettings {
    SETTINGS.get_or_init(|| {
        load_settings().unwrap_or_else(|error| {
            tracing::warn!(%error, "failed to load settings, using defaults");
            ConceptSettings::default()
        })
    })
}

/// Initialize the global settings with a specific value.
///
/// Returns the settings back if the global was already initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: ConceptSettings) -> std::result::Result<(), ConceptSettings> {
    SETTINGS.set(settings)
}
