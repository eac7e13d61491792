//! # concept-core
//!
//! Foundation types shared by the concept loader crates.
//!
//! - [`host`]: the capabilities the loader consumes from its host runtime
//!   (notifications, status display, option selection)
//! - [`logging`]: `tracing` subscriber setup and log capture for tests
//!
//! ## Crate Position
//!
//! Leaf crate (no internal dependencies).
//! Depended on by: concept-engine, concept-cli.

#![deny(unsafe_code)]

pub mod host;
pub mod logging;

pub use host::{HostUi, Severity, StatusStyle, StatusText};
