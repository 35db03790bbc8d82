//! Command implementations for relay-cli

pub mod module;

pub use module::{run_module_command, run_with_registry};
