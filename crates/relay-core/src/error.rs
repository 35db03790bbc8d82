//! Error types for relay-core

use crate::registry::RegistryError;

/// Result type for relay-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling a relay module
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `add` found a module with the same name and type
    #[error("Relay module \"{name}\" already exists!")]
    ModuleAlreadyExists { name: String },

    /// `edit` or `remove` found no module with the same name and type
    #[error("Relay module \"{name}\" does not exist!")]
    ModuleDoesNotExist { name: String },

    /// `edit` found nothing to change
    #[error("Relay module \"{name}\" has not been changed!")]
    ModuleHasNotBeenChanged { name: String },

    /// The matching remote module carries no usable `id`
    #[error("Relay module \"{name}\" was returned by the registry without an id")]
    MissingModuleId { name: String },

    /// Error from the registry, passed through as is
    #[error(transparent)]
    Registry(RegistryError),
}
