//! Matching, diffing and action planning
//!
//! Pure functions over an already fetched module list. Nothing here talks to
//! the registry.

use std::fmt;

use relay_settings::RelaySettings;
use serde_json::{Map, Value};

use crate::module::RemoteModule;
use crate::{Error, Result};

/// What the user asked to do with the declared module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Edit,
    Remove,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Remove => "remove",
        }
    }

    /// Past tense used in success messages.
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Add => "added",
            Self::Edit => "edited",
            Self::Remove => "removed",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single registry call that carries out an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Create a module from the full settings record
    Create { payload: Map<String, Value> },
    /// Patch the changed top-level keys of an existing module
    Update { id: String, patch: Map<String, Value> },
    /// Delete an existing module
    Delete { id: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create { .. } => write!(f, "create a new module"),
            Action::Update { id, patch } => {
                let keys: Vec<&str> = patch.keys().map(String::as_str).collect();
                write!(f, "update module {} ({})", id, keys.join(", "))
            }
            Action::Delete { id } => write!(f, "delete module {}", id),
        }
    }
}

/// First module, in registry order, with the same name and module type.
pub fn find_module<'a>(
    modules: &'a [RemoteModule],
    settings: &RelaySettings,
) -> Option<&'a RemoteModule> {
    modules.iter().find(|module| {
        module.name() == Some(settings.name.as_str())
            && module.module_type_id() == Some(settings.module_type_id.as_str())
    })
}

/// Top-level keys of `settings` whose value differs from the module's.
///
/// The comparison does not recurse: one changed leaf inside `settings`
/// puts the whole `settings` object in the result. A key the module lacks
/// counts as changed.
pub fn diff(module: &RemoteModule, settings: &RelaySettings) -> Map<String, Value> {
    settings
        .to_map()
        .into_iter()
        .filter(|(key, value)| module.get(key) != Some(value))
        .collect()
}

/// Decide which registry call `operation` needs given the current modules.
pub fn plan(
    operation: Operation,
    modules: &[RemoteModule],
    settings: &RelaySettings,
) -> Result<Action> {
    let existing = find_module(modules, settings);

    let action = match (operation, existing) {
        (Operation::Add, Some(_)) => {
            return Err(Error::ModuleAlreadyExists {
                name: settings.name.clone(),
            });
        }
        (Operation::Add, None) => Action::Create {
            payload: settings.to_map(),
        },
        (Operation::Edit | Operation::Remove, None) => {
            return Err(Error::ModuleDoesNotExist {
                name: settings.name.clone(),
            });
        }
        (Operation::Edit, Some(module)) => {
            let patch = diff(module, settings);
            if patch.is_empty() {
                return Err(Error::ModuleHasNotBeenChanged {
                    name: settings.name.clone(),
                });
            }
            Action::Update {
                id: module_id(module, settings)?,
                patch,
            }
        }
        (Operation::Remove, Some(module)) => Action::Delete {
            id: module_id(module, settings)?,
        },
    };

    tracing::debug!(%operation, %action, "Planned registry action");
    Ok(action)
}

fn module_id(module: &RemoteModule, settings: &RelaySettings) -> Result<String> {
    module
        .id()
        .map(str::to_string)
        .ok_or_else(|| Error::MissingModuleId {
            name: settings.name.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use relay_settings::{ModuleSettings, SupportedApi};
    use rstest::rstest;
    use serde_json::json;

    fn settings() -> RelaySettings {
        RelaySettings {
            name: "M".into(),
            module_type_id: "T".into(),
            visibility: "org".into(),
            settings: ModuleSettings {
                url: "https://a".into(),
                supported_apis: vec![SupportedApi::Health],
                extra: Map::new(),
            },
        }
    }

    fn module(value: Value) -> RemoteModule {
        serde_json::from_value(value).unwrap()
    }

    fn identical(id: &str) -> RemoteModule {
        let mut fields = settings().to_map();
        fields.insert("id".into(), json!(id));
        RemoteModule::new(fields)
    }

    #[test]
    fn test_find_module_needs_name_and_type() {
        let modules = vec![
            module(json!({"id": "1", "name": "M", "module_type_id": "other"})),
            module(json!({"id": "2", "name": "other", "module_type_id": "T"})),
            module(json!({"id": "3", "name": "M", "module_type_id": "T"})),
            module(json!({"id": "4", "name": "M", "module_type_id": "T"})),
        ];

        let found = find_module(&modules, &settings()).unwrap();
        assert_eq!(found.id(), Some("3"));
    }

    #[test]
    fn test_find_module_in_empty_list() {
        assert!(find_module(&[], &settings()).is_none());
    }

    #[test]
    fn test_diff_is_per_top_level_key() {
        let mut remote = identical("X");
        let mut fields = remote.clone().into_fields();
        fields.insert(
            "settings".into(),
            json!({"url": "https://b", "supported-apis": ["health"]}),
        );
        remote = RemoteModule::new(fields);

        let patch = diff(&remote, &settings());

        assert_eq!(
            Value::Object(patch),
            json!({"settings": {"url": "https://a", "supported-apis": ["health"]}})
        );
    }

    #[test]
    fn test_diff_counts_missing_keys_as_changed() {
        let remote = module(json!({"id": "X", "name": "M", "module_type_id": "T"}));

        let patch = diff(&remote, &settings());

        assert_eq!(
            patch.keys().map(String::as_str).collect::<Vec<_>>(),
            ["settings", "visibility"]
        );
    }

    #[test]
    fn test_diff_ignores_remote_only_keys() {
        let mut fields = identical("X").into_fields();
        fields.insert("enabled".into(), json!(true));

        assert!(diff(&RemoteModule::new(fields), &settings()).is_empty());
    }

    #[test]
    fn test_add_emits_full_payload() {
        let action = plan(Operation::Add, &[], &settings()).unwrap();
        assert_eq!(
            action,
            Action::Create {
                payload: settings().to_map()
            }
        );
    }

    #[rstest]
    #[case(Operation::Edit)]
    #[case(Operation::Remove)]
    fn test_missing_module(#[case] operation: Operation) {
        let err = plan(operation, &[], &settings()).unwrap_err();
        assert!(matches!(err, Error::ModuleDoesNotExist { .. }));
        assert_eq!(err.to_string(), "Relay module \"M\" does not exist!");
    }

    #[test]
    fn test_add_existing_module() {
        let err = plan(Operation::Add, &[identical("X")], &settings()).unwrap_err();
        assert_eq!(err.to_string(), "Relay module \"M\" already exists!");
    }

    #[test]
    fn test_edit_unchanged_module() {
        let err = plan(Operation::Edit, &[identical("X")], &settings()).unwrap_err();
        assert_eq!(err.to_string(), "Relay module \"M\" has not been changed!");
    }

    #[test]
    fn test_remove_targets_matched_id() {
        let action = plan(Operation::Remove, &[identical("X")], &settings()).unwrap();
        assert_eq!(action, Action::Delete { id: "X".into() });
    }

    #[test]
    fn test_matched_module_without_id() {
        let remote = module(json!({"name": "M", "module_type_id": "T"}));
        let err = plan(Operation::Remove, &[remote], &settings()).unwrap_err();
        assert!(matches!(err, Error::MissingModuleId { .. }));
    }

    #[test]
    fn test_action_display() {
        let mut patch = Map::new();
        patch.insert("settings".into(), json!({}));
        patch.insert("visibility".into(), json!("org"));

        assert_eq!(
            Action::Update {
                id: "X".into(),
                patch
            }
            .to_string(),
            "update module X (settings, visibility)"
        );
        assert_eq!(Action::Delete { id: "X".into() }.to_string(), "delete module X");
    }
}
