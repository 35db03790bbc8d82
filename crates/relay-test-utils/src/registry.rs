//! In-memory module registry

use std::cell::RefCell;

use relay_core::{ModuleRegistry, RegistryError, RemoteModule};
use serde_json::{Map, Value, json};

/// A registry call as seen by [`FakeRegistry`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(Map<String, Value>),
    Update(String, Map<String, Value>),
    Delete(String),
}

impl Call {
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Call::List)
    }
}

/// [`ModuleRegistry`] backed by a `Vec`, recording every call.
///
/// Created modules get a random UUID id. A registry built with
/// [`FakeRegistry::failing`] rejects every call with the given message.
#[derive(Debug, Default)]
pub struct FakeRegistry {
    modules: RefCell<Vec<RemoteModule>>,
    calls: RefCell<Vec<Call>>,
    failure: Option<String>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_modules(modules: Vec<RemoteModule>) -> Self {
        Self {
            modules: RefCell::new(modules),
            ..Self::default()
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Calls other than `list`.
    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.is_mutating())
            .cloned()
            .collect()
    }

    /// Current registry contents.
    pub fn modules(&self) -> Vec<RemoteModule> {
        self.modules.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), RegistryError> {
        self.calls.borrow_mut().push(call);
        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

impl ModuleRegistry for FakeRegistry {
    fn list(&self) -> Result<Vec<RemoteModule>, RegistryError> {
        self.record(Call::List)?;
        Ok(self.modules())
    }

    fn create(&self, payload: &Map<String, Value>) -> Result<RemoteModule, RegistryError> {
        self.record(Call::Create(payload.clone()))?;

        let mut fields = payload.clone();
        fields.insert("id".into(), json!(uuid::Uuid::new_v4().to_string()));
        let module = RemoteModule::new(fields);
        self.modules.borrow_mut().push(module.clone());
        Ok(module)
    }

    fn update(
        &self,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<RemoteModule, RegistryError> {
        self.record(Call::Update(id.to_string(), patch.clone()))?;

        let mut modules = self.modules.borrow_mut();
        let module = modules
            .iter_mut()
            .find(|module| module.id() == Some(id))
            .ok_or_else(|| format!("module {id} not found"))?;

        let mut fields = module.clone().into_fields();
        fields.extend(patch.clone());
        *module = RemoteModule::new(fields);
        Ok(module.clone())
    }

    fn delete(&self, id: &str) -> Result<(), RegistryError> {
        self.record(Call::Delete(id.to_string()))?;

        let mut modules = self.modules.borrow_mut();
        let before = modules.len();
        modules.retain(|module| module.id() != Some(id));
        if modules.len() == before {
            return Err(format!("module {id} not found").into());
        }
        Ok(())
    }
}
