//! Host hook wiring.
//!
//! [`ConceptExtension`] is what a host runtime registers: it resets the
//! session on session start, augments the instructions on every turn start,
//! and runs the toggle picker when the user asks for it.
//!
//! The host runs at most one turn per session at a time. The locks below
//! make the extension `Sync` for async hosts; they are never held across an
//! `.await`.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, info_span, warn};

use concept_core::{HostUi, Severity};
use concept_settings::ConceptSettings;

use crate::constants::{STATUS_LABEL, TOGGLE_PROMPT};
use crate::errors::ConceptError;
use crate::injector::Injector;
use crate::resolver::{Resolution, Resolver};
use crate::scanner::ReferenceScanner;
use crate::session::SessionContext;
use crate::store::{DocumentStore, FsDocumentStore};
use crate::toggle::{ManualToggles, ToggleOutcome, parse_option};

/// Input to the turn-start hook.
#[derive(Debug, Clone, Default)]
pub struct TurnStartEvent {
    /// The host's current instructions (system prompt).
    pub instructions: String,
    /// The user's message for this turn.
    pub prompt: String,
}

/// Output of the turn-start hook.
#[derive(Debug, Clone)]
pub struct TurnStartResult {
    /// Instructions to use for this turn's model call.
    pub instructions: String,
    /// Names this turn's resolution loaded.
    pub loaded: Vec<String>,
    /// Names this turn's resolution could not load.
    pub missing: Vec<String>,
}

/// Concept loading as a host extension.
#[derive(Debug)]
pub struct ConceptExtension {
    store: Arc<dyn DocumentStore>,
    scanner: ReferenceScanner,
    injector: Injector,
    toggles: Mutex<ManualToggles>,
    session: Mutex<SessionContext>,
}

impl ConceptExtension {
    /// Assemble an extension from its parts.
    pub fn new(store: Arc<dyn DocumentStore>, scanner: ReferenceScanner, injector: Injector) -> Self {
        Self {
            store,
            scanner,
            injector,
            toggles: Mutex::new(ManualToggles::new()),
            session: Mutex::new(SessionContext::new()),
        }
    }

    /// Directory-backed extension configured from settings.
    pub fn from_settings(settings: &ConceptSettings) -> Result<Self, ConceptError> {
        settings.validate()?;
        let store = FsDocumentStore::new(&settings.store.dir, &settings.store.extension);
        let scanner = ReferenceScanner::new(&settings.markers.prefix)?;
        let injector = Injector::from_settings(
            &settings.injection,
            &settings.markers.prefix,
            store.extension(),
        );
        Ok(Self::new(Arc::new(store), scanner, injector))
    }

    /// The backing document store.
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// The marker scanner.
    pub fn scanner(&self) -> &ReferenceScanner {
        &self.scanner
    }

    /// Run a standalone resolution pass (no session side effects).
    pub fn resolve(&self, text: &str) -> Resolution {
        Resolver::new(self.store.as_ref(), &self.scanner).resolve(text)
    }

    /// Names resolvable right now.
    pub fn list_available(&self) -> Vec<String> {
        self.store.list_available()
    }

    /// Concepts accumulated in the current session, in first-seen order.
    pub fn session_names(&self) -> Vec<String> {
        self.session.lock().names().map(ToString::to_string).collect()
    }

    /// Currently selected concepts, in selection order.
    pub fn selected(&self) -> Vec<String> {
        self.toggles.lock().selected().map(ToString::to_string).collect()
    }

    /// Session-start hook: begin a fresh session context.
    pub fn on_session_start(&self, ui: &dyn HostUi) {
        let mut session = self.session.lock();
        session.reset();
        *session = SessionContext::new();
        info!(session_id = %session.id(), "concept session started");
        drop(session);
        self.refresh_status(ui);
    }

    /// Turn-start hook: resolve, accumulate, and augment the instructions.
    pub fn on_turn_start(&self, event: &TurnStartEvent, ui: &dyn HostUi) -> TurnStartResult {
        let text = format!("{}\n{}", event.instructions, event.prompt);
        let resolution = self.resolve(&text);

        for name in resolution.missing() {
            warn!(name = %name, "missing concept");
            ui.notify(
                &format!("Missing concept: {}", self.store.document_label(name)),
                Severity::Warning,
            );
        }

        let selected = self.selected();
        let mut session = self.session.lock();
        let _span = info_span!("turn_start", session_id = %session.id()).entered();
        let _ = session.merge_auto_loaded(resolution.loaded().keys().cloned());
        let _ = session.merge_manual(selected);
        let snapshot = session.snapshot(self.store.as_ref());
        drop(session);

        let (loaded, missing) = resolution.into_parts();
        TurnStartResult {
            instructions: self.injector.build(&event.instructions, &snapshot),
            loaded: loaded.into_keys().collect(),
            missing: missing.into_iter().collect(),
        }
    }

    /// Toggle-command flow: pick a concept and flip its selection.
    ///
    /// Returns `None` when nothing is available or the picker is dismissed.
    pub async fn toggle_concept(&self, ui: &dyn HostUi) -> Option<ToggleOutcome> {
        let available = self.store.list_available();
        if available.is_empty() {
            ui.notify(
                &format!("No concepts found in {}", self.store.describe()),
                Severity::Info,
            );
            return None;
        }

        let options = self.toggles.lock().options(&available);
        let choice = ui.select(TOGGLE_PROMPT, &options).await?;
        let name = parse_option(&choice);

        let outcome = self.toggles.lock().toggle(name);
        info!(name = %outcome.name(), ?outcome, "concept toggled");
        ui.notify(&outcome.message(), Severity::Info);
        self.refresh_status(ui);
        Some(outcome)
    }

    fn refresh_status(&self, ui: &dyn HostUi) {
        let status = self.toggles.lock().status_text();
        ui.set_status(STATUS_LABEL, status);
    }
}
