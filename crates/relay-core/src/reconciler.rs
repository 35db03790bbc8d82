//! Reconciler: list, plan, act

use std::fmt;

use relay_settings::RelaySettings;

use crate::plan::{Action, Operation, plan};
use crate::registry::ModuleRegistry;
use crate::{Error, Result};

/// Result of a completed operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub operation: Operation,
    /// Expanded module name
    pub name: String,
    pub action: Action,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Relay module \"{}\" has been successfully {}!",
            self.name,
            self.operation.past_tense()
        )
    }
}

/// Applies operations against a [`ModuleRegistry`].
///
/// Each call performs one `list` and at most one mutating request. Nothing
/// is cached between calls.
#[derive(Debug)]
pub struct Reconciler<R> {
    registry: R,
}

impl<R: ModuleRegistry> Reconciler<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Work out the action for `operation` without changing the registry.
    pub fn preview(&self, operation: Operation, settings: &RelaySettings) -> Result<Action> {
        let modules = self.registry.list().map_err(Error::Registry)?;
        tracing::debug!(count = modules.len(), "Fetched relay modules");
        plan(operation, &modules, settings)
    }

    /// Carry out `operation`.
    pub fn run(&self, operation: Operation, settings: &RelaySettings) -> Result<Outcome> {
        let action = self.preview(operation, settings)?;
        self.apply(&action)?;

        Ok(Outcome {
            operation,
            name: settings.name.clone(),
            action,
        })
    }

    fn apply(&self, action: &Action) -> Result<()> {
        match action {
            Action::Create { payload } => {
                let created = self.registry.create(payload).map_err(Error::Registry)?;
                tracing::debug!(id = created.id().unwrap_or_default(), "Created relay module");
            }
            Action::Update { id, patch } => {
                self.registry.update(id, patch).map_err(Error::Registry)?;
                tracing::debug!(%id, "Updated relay module");
            }
            Action::Delete { id } => {
                self.registry.delete(id).map_err(Error::Registry)?;
                tracing::debug!(%id, "Deleted relay module");
            }
        }
        Ok(())
    }
}
