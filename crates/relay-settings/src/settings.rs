//! Typed Relay settings record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;
use crate::constants::{SUPPORTED_APIS_FIELD, URL_FIELD};
use crate::expand::expand;
use crate::schema::SupportedApi;

/// Desired state of one relay module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaySettings {
    /// Module name, matched against the registry together with `module_type_id`
    pub name: String,
    pub module_type_id: String,
    pub visibility: String,
    pub settings: ModuleSettings,
}

/// The `settings` object of a relay module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSettings {
    pub url: String,
    #[serde(rename = "supported-apis")]
    pub supported_apis: Vec<SupportedApi>,
    /// Keys the schema does not know about, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RelaySettings {
    /// Render the record as the JSON object sent to the registry.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("name".into(), Value::String(self.name.clone()));
        map.insert(
            "module_type_id".into(),
            Value::String(self.module_type_id.clone()),
        );
        map.insert("visibility".into(), Value::String(self.visibility.clone()));
        map.insert("settings".into(), Value::Object(self.settings.to_map()));
        map
    }

    /// Expand placeholders in `name` and in every string directly under
    /// `settings`. Nested values are left alone.
    ///
    /// Consumes the record so a failure never leaves a half-expanded copy.
    pub fn expanded<F>(self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = expand(&self.name, &lookup)?;
        let url = expand(&self.settings.url, &lookup)?;

        let mut extra = Map::with_capacity(self.settings.extra.len());
        for (key, value) in self.settings.extra {
            let value = match value {
                Value::String(text) => Value::String(expand(&text, &lookup)?),
                other => other,
            };
            extra.insert(key, value);
        }

        Ok(Self {
            name,
            module_type_id: self.module_type_id,
            visibility: self.visibility,
            settings: ModuleSettings {
                url,
                supported_apis: self.settings.supported_apis,
                extra,
            },
        })
    }
}

impl ModuleSettings {
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        map.insert(URL_FIELD.into(), Value::String(self.url.clone()));
        map.insert(
            SUPPORTED_APIS_FIELD.into(),
            Value::Array(
                self.supported_apis
                    .iter()
                    .map(|api| Value::String(api.as_str().to_string()))
                    .collect(),
            ),
        );
        map
    }
}
