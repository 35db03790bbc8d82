//! Add / edit / remove command implementations
//!
//! All three commands share one flow: build the client, load the settings
//! file, then let the reconciler pick and perform the registry call.

use std::path::Path;

use relay_client::ThreatResponseClient;
use relay_core::{ModuleRegistry, Operation, Reconciler};
use relay_settings::{env_lookup, load_settings_file};

use crate::cli::ModuleArgs;
use crate::error::Result;
use crate::interactive::resolve_credentials;

/// Run a module command against Threat Response.
///
/// Returns the message to show on success.
pub fn run_module_command(operation: Operation, args: &ModuleArgs) -> Result<String> {
    let credentials = resolve_credentials(args.client_id.clone(), args.client_password.clone())?;
    let client = ThreatResponseClient::new(credentials, args.region)?;
    tracing::debug!(region = %args.region, %operation, "Threat Response client ready");

    run_with_registry(
        &client,
        operation,
        &args.settings_file,
        args.dry_run,
        env_lookup,
    )
}

/// Run a module command against any registry, expanding settings
/// placeholders with `lookup`.
pub fn run_with_registry<R, F>(
    registry: R,
    operation: Operation,
    settings_file: &Path,
    dry_run: bool,
    lookup: F,
) -> Result<String>
where
    R: ModuleRegistry,
    F: Fn(&str) -> Option<String>,
{
    let settings = load_settings_file(settings_file, lookup)?;
    let reconciler = Reconciler::new(registry);

    if dry_run {
        let action = reconciler.preview(operation, &settings)?;
        return Ok(format!(
            "[dry-run] Would {} for relay module \"{}\"",
            action, settings.name
        ));
    }

    let outcome = reconciler.run(operation, &settings)?;
    Ok(outcome.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use pretty_assertions::assert_eq;
    use relay_test_utils::{Call, FakeRegistry, SettingsFile, settings, settings_json, test_env};
    use serde_json::{Value, json};

    fn run(registry: &FakeRegistry, operation: Operation, file: &SettingsFile) -> Result<String> {
        let env = test_env();
        run_with_registry(registry, operation, file.path(), false, |name: &str| {
            env.get(name).cloned()
        })
    }

    fn stale_module(id: &str) -> Value {
        json!({
            "name": "<NAME>",
            "module_type_id": settings().module_type_id,
            "visibility": "org",
            "settings": {"foo": "bar"},
            "id": id,
        })
    }

    #[test]
    fn test_add_ok() {
        let file = SettingsFile::new(&settings_json());
        let registry = FakeRegistry::new();

        let message = run(&registry, Operation::Add, &file).unwrap();

        assert_eq!(message, "Relay module \"<NAME>\" has been successfully added!");
        assert_eq!(
            registry.calls(),
            vec![Call::List, Call::Create(settings().to_map())]
        );
    }

    #[test]
    fn test_edit_ok() {
        let file = SettingsFile::new(&settings_json());
        let registry = FakeRegistry::with_modules(vec![
            serde_json::from_value(stale_module("X")).unwrap(),
        ]);

        let message = run(&registry, Operation::Edit, &file).unwrap();

        assert_eq!(message, "Relay module \"<NAME>\" has been successfully edited!");
        let mut diff = serde_json::Map::new();
        diff.insert("settings".into(), Value::Object(settings().settings.to_map()));
        assert_eq!(registry.mutating_calls(), vec![Call::Update("X".into(), diff)]);
    }

    #[test]
    fn test_remove_ok() {
        let file = SettingsFile::new(&settings_json());
        let registry = FakeRegistry::with_modules(vec![
            serde_json::from_value(stale_module("X")).unwrap(),
        ]);

        let message = run(&registry, Operation::Remove, &file).unwrap();

        assert_eq!(message, "Relay module \"<NAME>\" has been successfully removed!");
        assert_eq!(registry.mutating_calls(), vec![Call::Delete("X".into())]);
    }

    #[test]
    fn test_settings_error_stops_before_registry() {
        let file = SettingsFile::new(&settings_json());
        let registry = FakeRegistry::new();

        let err = run_with_registry(&registry, Operation::Add, file.path(), false, |name: &str| {
            (name != "NAME").then(|| "x".to_string())
        })
        .unwrap_err();

        assert!(matches!(err, CliError::Settings(_)));
        assert_eq!(
            err.to_string(),
            "Unable to read environment variable \"NAME\" for Relay settings JSON expansion. \
             Make sure to define it first."
        );
        assert!(registry.calls().is_empty());
    }

    #[test]
    fn test_processing_errors() {
        let file = SettingsFile::new(&settings_json());

        let existing = FakeRegistry::with_modules(vec![relay_test_utils::remote_module(
            &settings(),
            "X",
        )]);
        let err = run(&existing, Operation::Add, &file).unwrap_err();
        assert_eq!(err.to_string(), "Relay module \"<NAME>\" already exists!");

        for operation in [Operation::Edit, Operation::Remove] {
            let empty = FakeRegistry::new();
            let err = run(&empty, operation, &file).unwrap_err();
            assert!(matches!(err, CliError::Core(_)));
            assert_eq!(err.to_string(), "Relay module \"<NAME>\" does not exist!");
        }
    }

    #[test]
    fn test_registry_error_is_surfaced() {
        let file = SettingsFile::new(&settings_json());
        let registry = FakeRegistry::failing("Unable to connect to Threat Response.");

        let err = run(&registry, Operation::Remove, &file).unwrap_err();

        assert_eq!(err.to_string(), "Unable to connect to Threat Response.");
    }

    #[test]
    fn test_dry_run_skips_mutation() {
        let file = SettingsFile::new(&settings_json());
        let registry = FakeRegistry::with_modules(vec![
            serde_json::from_value(stale_module("X")).unwrap(),
        ]);
        let env = test_env();

        let message = run_with_registry(&registry, Operation::Edit, file.path(), true, |name: &str| {
            env.get(name).cloned()
        })
        .unwrap();

        assert_eq!(
            message,
            "[dry-run] Would update module X (settings) for relay module \"<NAME>\""
        );
        assert_eq!(registry.calls(), vec![Call::List]);
    }
}
