//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`ConceptSettings::default()`]
//! 2. If `~/.concepts/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//! 4. Validate the result
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::ConceptSettings;

pub(crate) fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Resolve the path to the settings file (`~/.concepts/settings.json`).
pub fn settings_path() -> PathBuf {
    home_dir().join(".concepts").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<ConceptSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. Invalid JSON or invalid values are errors.
pub fn load_settings_from_path(path: &Path) -> Result<ConceptSettings> {
    let mut settings = load_file_layer(path)?;
    apply_env_overrides(&mut settings);
    settings.validate()?;
    Ok(settings)
}

fn load_file_layer(path: &Path) -> Result<ConceptSettings> {
    let defaults = serde_json::to_value(ConceptSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `CONCEPTS_*` environment variable overrides.
pub fn apply_env_overrides(settings: &mut ConceptSettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides from an arbitrary variable lookup.
///
/// Empty values are ignored; invalid booleans are ignored with a warning.
pub fn apply_overrides_from<F>(settings: &mut ConceptSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(v) = read("CONCEPTS_DIR") {
        settings.store.dir = v;
    }
    if let Some(v) = read("CONCEPTS_EXTENSION") {
        settings.store.extension = v.trim_start_matches('.').to_string();
    }
    if let Some(v) = read("CONCEPTS_PREFIX") {
        settings.markers.prefix = v;
    }
    if let Some(v) = read("CONCEPTS_PREAMBLE") {
        match parse_bool(&v) {
            Some(enabled) => settings.injection.preamble_enabled = enabled,
            None => {
                tracing::warn!(key = "CONCEPTS_PREAMBLE", value = %v, "invalid boolean env var, ignoring");
            }
        }
    }
    if let Some(v) = read("CONCEPTS_LOG_LEVEL") {
        settings.logging.level = v;
    }
}

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::errors::SettingsError;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({"store": {"dir": "/a", "extension": "md"}});
        let source = serde_json::json!({"store": {"dir": "/b"}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["store"]["dir"], "/b");
        assert_eq!(merged["store"]["extension"], "md");
    }

    #[test]
    fn merge_null_preserves_target() {
        let merged = deep_merge(
            serde_json::json!({"a": 1, "b": 2}),
            serde_json::json!({"a": null}),
        );
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_array_replace() {
        let merged = deep_merge(
            serde_json::json!({"items": [1, 2, 3]}),
            serde_json::json!({"items": [4]}),
        );
        assert_eq!(merged["items"], serde_json::json!([4]));
    }

    // ── load_settings_from_path ─────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let settings = load_file_layer(Path::new("/nonexistent/settings.json")).unwrap();
        assert_eq!(settings.markers.prefix, "cf");
        assert_eq!(settings.store.extension, "md");
    }

    #[test]
    fn load_partial_json_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"store": {"dir": "/srv/concepts"}, "injection": {"preambleEnabled": false}}"#,
        )
        .unwrap();

        let settings = load_file_layer(&path).unwrap();
        assert_eq!(settings.store.dir, "/srv/concepts");
        assert_eq!(settings.store.extension, "md");
        assert!(!settings.injection.preamble_enabled);
        assert_eq!(settings.injection.heading, "# Loaded Concepts");
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result = load_settings_from_path(&path);
        assert!(matches!(result.unwrap_err(), SettingsError::Json(_)));
    }

    #[test]
    fn load_invalid_value_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"markers": {"prefix": ""}}"#).unwrap();

        let settings = load_file_layer(&path).unwrap();
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidValue(_))
        ));
    }

    // ── overrides ───────────────────────────────────────────────────

    #[test]
    fn overrides_apply_over_file_values() {
        let mut settings = ConceptSettings::default();
        apply_overrides_from(
            &mut settings,
            lookup(&[
                ("CONCEPTS_DIR", "/tmp/c"),
                ("CONCEPTS_EXTENSION", ".txt"),
                ("CONCEPTS_PREFIX", "ref"),
                ("CONCEPTS_PREAMBLE", "off"),
                ("CONCEPTS_LOG_LEVEL", "debug"),
            ]),
        );
        assert_eq!(settings.store.dir, "/tmp/c");
        assert_eq!(settings.store.extension, "txt");
        assert_eq!(settings.markers.prefix, "ref");
        assert!(!settings.injection.preamble_enabled);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn empty_and_invalid_overrides_are_ignored() {
        let mut settings = ConceptSettings::default();
        apply_overrides_from(
            &mut settings,
            lookup(&[("CONCEPTS_PREFIX", ""), ("CONCEPTS_PREAMBLE", "maybe")]),
        );
        assert_eq!(settings.markers.prefix, "cf");
        assert!(settings.injection.preamble_enabled);
    }

    // ── parse_bool ──────────────────────────────────────────────────

    #[test]
    fn parse_bool_variants() {
        for val in &["true", "1", "yes", "on", "TRUE", "Yes"] {
            assert_eq!(parse_bool(val), Some(true), "failed for {val}");
        }
        for val in &["false", "0", "no", "off", "OFF"] {
            assert_eq!(parse_bool(val), Some(false), "failed for {val}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }
}
