//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so a settings
//! file only needs the keys it overrides.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};
use crate::loader::home_dir;

/// Root settings type.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConceptSettings {
    /// Where concept documents live.
    pub store: StoreSettings,
    /// Reference marker syntax.
    pub markers: MarkerSettings,
    /// How loaded concepts are rendered into instructions.
    pub injection: InjectionSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl ConceptSettings {
    /// Reject values the loader cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.markers.prefix.is_empty() {
            return Err(SettingsError::InvalidValue(
                "markers.prefix must not be empty".to_string(),
            ));
        }
        if self.markers.prefix.contains(']') {
            return Err(SettingsError::InvalidValue(format!(
                "markers.prefix must not contain ']': {}",
                self.markers.prefix
            )));
        }
        if self.store.extension.is_empty() || self.store.extension.contains('/') {
            return Err(SettingsError::InvalidValue(format!(
                "store.extension is not a file extension: {:?}",
                self.store.extension
            )));
        }
        Ok(())
    }
}

/// Document store location.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// Flat directory of concept files.
    pub dir: String,
    /// File extension (without the dot) that marks a concept file.
    pub extension: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            dir: home_dir()
                .join(".concepts")
                .join("concepts")
                .to_string_lossy()
                .into_owned(),
            extension: "md".to_string(),
        }
    }
}

/// Reference marker syntax: `[[<prefix>:<name>]]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerSettings {
    /// Prefix inside the opening brackets.
    pub prefix: String,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            prefix: "cf".to_string(),
        }
    }
}

/// Rendering of the per-turn augmentation block.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InjectionSettings {
    /// Prepend the framework preamble explaining the marker syntax.
    pub preamble_enabled: bool,
    /// Heading placed above the concept blocks.
    pub heading: String,
    /// Separator between concept blocks.
    pub separator: String,
}

impl Default for InjectionSettings {
    fn default() -> Self {
        Self {
            preamble_enabled: true,
            heading: "# Loaded Concepts".to_string(),
            separator: "\n\n---\n\n".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
