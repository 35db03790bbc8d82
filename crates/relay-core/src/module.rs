//! Remote module records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A module as returned by the registry.
///
/// The registry owns the shape; only `id`, `name` and `module_type_id` are
/// interpreted here and every other field is carried verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteModule(Map<String, Value>);

impl RemoteModule {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn module_type_id(&self) -> Option<&str> {
        self.str_field("module_type_id")
    }

    /// Raw value of a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for RemoteModule {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
