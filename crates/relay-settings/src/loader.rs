//! Loading (parse, validate, expand) of Relay settings documents

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::expand::env_lookup;
use crate::schema::{self, SchemaErrors};
use crate::settings::RelaySettings;
use crate::{Error, Result};

/// Load a settings document from `reader`.
///
/// The document is parsed, checked against the schema and then expanded
/// with `lookup` as the variable source. Nothing is returned unless every
/// step succeeds.
pub fn load_settings<R, F>(reader: R, lookup: F) -> Result<RelaySettings>
where
    R: Read,
    F: Fn(&str) -> Option<String>,
{
    let document: Value =
        serde_json::from_reader(reader).map_err(|source| Error::Malformed { source })?;

    schema::validate(&document).map_err(Error::Schema)?;

    let settings: RelaySettings = serde_json::from_value(document)
        .map_err(|e| Error::Schema(SchemaErrors::single("document", e.to_string())))?;

    let settings = settings.expanded(lookup)?;
    tracing::debug!(
        name = %settings.name,
        module_type_id = %settings.module_type_id,
        "Loaded relay settings"
    );

    Ok(settings)
}

/// Load a settings document, expanding placeholders from the process
/// environment.
pub fn load_settings_from_env<R: Read>(reader: R) -> Result<RelaySettings> {
    load_settings(reader, env_lookup)
}

/// Open `path` and load the settings document it holds.
pub fn load_settings_file<F>(path: &Path, lookup: F) -> Result<RelaySettings>
where
    F: Fn(&str) -> Option<String>,
{
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), "Reading relay settings file");
    load_settings(BufReader::new(file), lookup)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_vars(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_malformed_json() {
        let err = load_settings("Hello, World!".as_bytes(), no_vars).unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn test_schema_error_is_reported_before_expansion() {
        let err = load_settings(r#"{"name": "$MISSING"}"#.as_bytes(), no_vars).unwrap_err();
        let Error::Schema(errors) = err else {
            panic!("expected schema error");
        };
        assert!(errors.get("module_type_id").is_some());
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = load_settings_file(Path::new("/nonexistent/relay_settings.json"), no_vars)
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!err.is_validation());
        assert!(err.to_string().contains("relay_settings.json"));
    }
}
