//! Structural schema for Relay settings documents
//!
//! The document layout is fixed:
//!
//! ```text
//! {
//!   "name": "<non-empty string>",
//!   "module_type_id": "<non-empty string>",
//!   "visibility": "<non-empty string>",
//!   "settings": {
//!     "url": "<non-empty string>",
//!     "supported-apis": ["health", ...],
//!     "...": <anything>
//!   }
//! }
//! ```
//!
//! Unknown keys are accepted inside `settings` only. Validation walks the
//! whole document and reports every violation at once.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{SUPPORTED_APIS_FIELD, TOP_LEVEL_FIELDS, URL_FIELD};

/// API surfaces a relay module may forward to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedApi {
    #[serde(rename = "health")]
    Health,
    #[serde(rename = "observe/observables")]
    ObserveObservables,
    #[serde(rename = "deliberate/observables")]
    DeliberateObservables,
    #[serde(rename = "refer/observables")]
    ReferObservables,
    #[serde(rename = "respond/observables")]
    RespondObservables,
    #[serde(rename = "respond/trigger")]
    RespondTrigger,
}

impl SupportedApi {
    /// Every supported API, in declaration order.
    pub const ALL: [SupportedApi; 6] = [
        SupportedApi::Health,
        SupportedApi::ObserveObservables,
        SupportedApi::DeliberateObservables,
        SupportedApi::ReferObservables,
        SupportedApi::RespondObservables,
        SupportedApi::RespondTrigger,
    ];

    /// Endpoint path as written in settings files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::ObserveObservables => "observe/observables",
            Self::DeliberateObservables => "deliberate/observables",
            Self::ReferObservables => "refer/observables",
            Self::RespondObservables => "respond/observables",
            Self::RespondTrigger => "respond/trigger",
        }
    }
}

impl FromStr for SupportedApi {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|api| api.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for SupportedApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema violations keyed by dotted field path (e.g. `settings.url`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl SchemaErrors {
    /// A report holding a single violation.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with at least one violation.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Messages recorded for a field path.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Field paths with violations, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string_pretty(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// Check a parsed document against the settings schema.
pub fn validate(document: &Value) -> std::result::Result<(), SchemaErrors> {
    let mut errors = SchemaErrors::default();

    let Some(root) = document.as_object() else {
        errors.push("document", "must be of dict type");
        return Err(errors);
    };

    for field in ["name", "module_type_id", "visibility"] {
        check_string(&mut errors, field, root.get(field));
    }

    match required(&mut errors, "settings", root.get("settings")) {
        Some(Value::Object(settings)) if settings.is_empty() => {
            errors.push("settings", "empty values not allowed");
        }
        Some(Value::Object(settings)) => check_module_settings(&mut errors, settings),
        Some(_) => errors.push("settings", "must be of dict type"),
        None => {}
    }

    for key in root.keys() {
        if !TOP_LEVEL_FIELDS.contains(&key.as_str()) {
            errors.push(key.as_str(), "unknown field");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_module_settings(errors: &mut SchemaErrors, settings: &Map<String, Value>) {
    let url_path = format!("settings.{URL_FIELD}");
    check_string(errors, &url_path, settings.get(URL_FIELD));

    let apis_path = format!("settings.{SUPPORTED_APIS_FIELD}");
    match required(errors, &apis_path, settings.get(SUPPORTED_APIS_FIELD)) {
        Some(Value::Array(apis)) if apis.is_empty() => {
            errors.push(apis_path, "empty values not allowed");
        }
        Some(Value::Array(apis)) => {
            let unallowed: Vec<Value> = apis
                .iter()
                .filter(|api| {
                    api.as_str()
                        .is_none_or(|path| path.parse::<SupportedApi>().is_err())
                })
                .cloned()
                .collect();
            if !unallowed.is_empty() {
                errors.push(apis_path, format!("unallowed values {}", Value::Array(unallowed)));
            }
        }
        Some(_) => errors.push(apis_path, "must be of list type"),
        None => {}
    }
}

/// Record missing and null values; hand back anything else for type checks.
fn required<'a>(
    errors: &mut SchemaErrors,
    field: &str,
    value: Option<&'a Value>,
) -> Option<&'a Value> {
    match value {
        None => {
            errors.push(field, "required field");
            None
        }
        Some(Value::Null) => {
            errors.push(field, "null value not allowed");
            None
        }
        Some(value) => Some(value),
    }
}

fn check_string(errors: &mut SchemaErrors, field: &str, value: Option<&Value>) {
    match required(errors, field, value) {
        Some(Value::String(s)) if s.is_empty() => errors.push(field, "empty values not allowed"),
        Some(Value::String(_)) | None => {}
        Some(_) => errors.push(field, "must be of string type"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_document() -> Value {
        json!({
            "name": "Relay",
            "module_type_id": "a14ae422-01b6-5013-9876-695ff1b0ebe0",
            "visibility": "org",
            "settings": {
                "url": "https://relay.example.com",
                "supported-apis": ["health", "respond/trigger"],
            },
        })
    }

    #[test]
    fn test_valid_document_passes() {
        assert!(validate(&valid_document()).is_ok());
    }

    #[test]
    fn test_supported_api_round_trips_through_str() {
        for api in SupportedApi::ALL {
            assert_eq!(api.as_str().parse::<SupportedApi>(), Ok(api));
        }
        assert!("respond/everything".parse::<SupportedApi>().is_err());
    }

    #[test]
    fn test_non_object_document() {
        let errors = validate(&json!(["Hello, World!"])).unwrap_err();
        assert_eq!(errors.get("document").unwrap(), ["must be of dict type"]);
    }

    #[test]
    fn test_unknown_settings_keys_are_allowed() {
        let mut document = valid_document();
        document["settings"]["jwt"] = json!({"nested": [1, 2, 3]});
        assert!(validate(&document).is_ok());
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        let mut document = valid_document();
        document["message"] = json!("Hello, World!");
        let errors = validate(&document).unwrap_err();
        assert_eq!(errors.get("message").unwrap(), ["unknown field"]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_empty_settings_skips_nested_rules() {
        let mut document = valid_document();
        document["settings"] = json!({});
        let errors = validate(&document).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["settings"]);
    }

    #[test]
    fn test_non_string_api_is_unallowed() {
        let mut document = valid_document();
        document["settings"]["supported-apis"] = json!(["health", 42]);
        let errors = validate(&document).unwrap_err();
        assert_eq!(
            errors.get("settings.supported-apis").unwrap(),
            ["unallowed values [42]"]
        );
    }

    #[test]
    fn test_display_renders_json_object() {
        let errors = SchemaErrors::single("name", "required field");
        let rendered = errors.to_string();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, json!({"name": ["required field"]}));
    }
}
