//! Shared test utilities for the relay workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`] — settings documents, records and matching remote modules
//! - [`registry`] — [`FakeRegistry`], an in-memory [`ModuleRegistry`]
//!
//! [`FakeRegistry`]: registry::FakeRegistry
//! [`ModuleRegistry`]: relay_core::ModuleRegistry

pub mod fixtures;
pub mod registry;

pub use fixtures::{SettingsFile, remote_module, settings, settings_json, test_env};
pub use registry::{Call, FakeRegistry};
