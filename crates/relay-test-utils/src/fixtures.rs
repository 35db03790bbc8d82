//! Settings fixtures

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use relay_core::RemoteModule;
use relay_settings::{RelaySettings, SupportedApi, load_settings};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Module type used by every fixture.
pub const MODULE_TYPE_ID: &str = "a14ae422-01b6-5013-9876-695ff1b0ebe0";

/// Variables referenced by [`settings_json`], each set to `<NAME>`.
pub fn test_env() -> HashMap<String, String> {
    ["NAME", "URL"]
        .into_iter()
        .map(|key| (key.to_string(), format!("<{key}>")))
        .collect()
}

/// A settings document with `$NAME` / `${URL}` placeholders and every
/// supported API.
pub fn settings_json() -> Value {
    let apis: Vec<&str> = SupportedApi::ALL.iter().map(|api| api.as_str()).collect();
    json!({
        "name": "${NAME}",
        "module_type_id": MODULE_TYPE_ID,
        "visibility": "org",
        "settings": {
            "url": "$URL",
            "supported-apis": apis,
        },
    })
}

/// [`settings_json`] loaded with [`test_env`].
pub fn settings() -> RelaySettings {
    let env = test_env();
    let text = settings_json().to_string();
    load_settings(text.as_bytes(), |name: &str| env.get(name).cloned())
        .expect("fixture settings must load")
}

/// A remote module identical to `settings`, under `id`.
pub fn remote_module(settings: &RelaySettings, id: &str) -> RemoteModule {
    let mut fields = settings.to_map();
    fields.insert("id".into(), json!(id));
    RemoteModule::new(fields)
}

/// A settings document written to a temporary directory.
pub struct SettingsFile {
    temp_dir: TempDir,
    path: PathBuf,
}

impl SettingsFile {
    /// Write `document` as `relay_settings.json`.
    pub fn new(document: &Value) -> Self {
        Self::with_contents(&document.to_string())
    }

    /// Write raw text as `relay_settings.json`.
    pub fn with_contents(contents: &str) -> Self {
        let temp_dir = TempDir::new().expect("SettingsFile: failed to create temp dir");
        let path = temp_dir.path().join(relay_settings::SETTINGS_FILE_DEFAULT);
        fs::write(&path, contents).expect("SettingsFile: failed to write settings");
        Self { temp_dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the file.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}
