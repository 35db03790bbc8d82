//! Reconciliation layer for the Relay module manager
//!
//! Decides which single registry call brings the remote module registry in
//! line with a loaded [`RelaySettings`] record, and performs it:
//!
//! ```text
//!            RelaySettings + Operation
//!                       |
//!      ModuleRegistry::list -> plan -> Action
//!                       |
//!        create | update(id, patch) | delete(id)
//! ```
//!
//! The registry itself sits behind the [`ModuleRegistry`] trait so the HTTP
//! client can be swapped for a test double.
//!
//! [`RelaySettings`]: relay_settings::RelaySettings

pub mod error;
pub mod module;
pub mod plan;
pub mod reconciler;
pub mod registry;

pub use error::{Error, Result};
pub use module::RemoteModule;
pub use plan::{Action, Operation, diff, find_module, plan};
pub use reconciler::{Outcome, Reconciler};
pub use registry::{ModuleRegistry, RegistryError};
