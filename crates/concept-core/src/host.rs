//! Host runtime capabilities.
//!
//! The loader never drives the conversation itself. Everything user-facing
//! goes through [`HostUi`], which the embedding runtime implements: a
//! notification sink, a status-display sink, and a selection primitive.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational (toggle state changes, empty-state notices).
    Info,
    /// Something the user should know about (e.g. a missing document).
    Warning,
    /// A failure reported by the host itself.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Theme color applied to status text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusStyle {
    /// Unstyled.
    #[default]
    Plain,
    /// Positive/active state.
    Success,
    /// Muted secondary text.
    Dim,
}

/// Styled text for the status-display sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusText {
    /// Theme color.
    pub style: StatusStyle,
    /// Raw text.
    pub text: String,
}

impl StatusText {
    /// Unstyled status text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            style: StatusStyle::Plain,
            text: text.into(),
        }
    }

    /// Status text in the success color.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            style: StatusStyle::Success,
            text: text.into(),
        }
    }
}

/// User-facing capabilities provided by the host runtime.
///
/// Implementations must be cheap to call from inside a turn-start hook;
/// none of these calls are expected to fail from the loader's point of view.
#[async_trait]
pub trait HostUi: Send + Sync {
    /// Show a notification.
    fn notify(&self, message: &str, severity: Severity);

    /// Set the status entry for `label`. `None` clears it.
    fn set_status(&self, label: &str, text: Option<StatusText>);

    /// Ask the user to pick one of `options`. `None` means dismissed.
    async fn select(&self, prompt: &str, options: &[String]) -> Option<String>;
}
