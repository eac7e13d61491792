//! # concept-engine
//!
//! Resolves `[[cf:name]]` concept references into shared knowledge documents
//! and keeps them in the model's instructions for the rest of the session.
//!
//! ## Module Overview
//!
//! - [`store`]: Document lookup by name (directory-backed or in-memory)
//! - [`scanner`]: `[[<prefix>:name]]` reference extraction
//! - [`resolver`]: Transitive expansion into loaded/missing sets (worklist, cycle-safe)
//! - [`session`]: Per-session ordered accumulation of active concepts
//! - [`injector`]: Renders active concepts into augmented instructions
//! - [`toggle`]: Manual concept selection independent of scanning
//! - [`extension`]: Host hook wiring (session start, turn start, toggle command)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use concept_engine::resolver::Resolver;
//! use concept_engine::scanner::ReferenceScanner;
//! use concept_engine::store::FsDocumentStore;
//!
//! let store = FsDocumentStore::new("/path/to/concepts", "md");
//! let scanner = ReferenceScanner::default();
//! let resolution = Resolver::new(&store, &scanner).resolve("see [[cf:alpha]]");
//! println!("loaded: {:?}", resolution.loaded_names());
//! println!("missing: {:?}", resolution.missing());
//! ```
//!
//! ## Crate Position
//!
//! Depends on: concept-core, concept-settings.
//! Depended on by: concept-cli.

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod extension;
pub mod injector;
pub mod resolver;
pub mod scanner;
pub mod session;
pub mod store;
pub mod toggle;

pub use errors::ConceptError;
pub use extension::{ConceptExtension, TurnStartEvent, TurnStartResult};
pub use injector::Injector;
pub use resolver::{Resolution, Resolver};
pub use scanner::ReferenceScanner;
pub use session::{AddedVia, SessionContext, SnapshotEntry};
pub use store::{DocumentStore, FsDocumentStore, MemoryDocumentStore};
pub use toggle::{ManualToggles, ToggleOutcome};
