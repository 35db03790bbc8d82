//! Registry abstraction
//!
//! The remote module registry is owned by another service. This trait is the
//! only way the reconciler talks to it.

use serde_json::{Map, Value};

use crate::module::RemoteModule;

/// Error produced by a registry implementation (transport, auth, API).
pub type RegistryError = Box<dyn std::error::Error + Send + Sync>;

/// CRUD operations on the remote module registry.
pub trait ModuleRegistry {
    /// Fetch every module visible to the client, in registry order.
    fn list(&self) -> Result<Vec<RemoteModule>, RegistryError>;

    /// Create a module from a full settings payload.
    fn create(&self, payload: &Map<String, Value>) -> Result<RemoteModule, RegistryError>;

    /// Apply a partial update to the module with the given id.
    fn update(&self, id: &str, patch: &Map<String, Value>)
    -> Result<RemoteModule, RegistryError>;

    /// Delete the module with the given id.
    fn delete(&self, id: &str) -> Result<(), RegistryError>;
}

impl<R: ModuleRegistry + ?Sized> ModuleRegistry for &R {
    fn list(&self) -> Result<Vec<RemoteModule>, RegistryError> {
        (**self).list()
    }

    fn create(&self, payload: &Map<String, Value>) -> Result<RemoteModule, RegistryError> {
        (**self).create(payload)
    }

    fn update(
        &self,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<RemoteModule, RegistryError> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: &str) -> Result<(), RegistryError> {
        (**self).delete(id)
    }
}

impl<R: ModuleRegistry + ?Sized> ModuleRegistry for Box<R> {
    fn list(&self) -> Result<Vec<RemoteModule>, RegistryError> {
        (**self).list()
    }

    fn create(&self, payload: &Map<String, Value>) -> Result<RemoteModule, RegistryError> {
        (**self).create(payload)
    }

    fn update(
        &self,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<RemoteModule, RegistryError> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: &str) -> Result<(), RegistryError> {
        (**self).delete(id)
    }
}
