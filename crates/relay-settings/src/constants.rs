//! Well-known names shared by the settings loader and the CLI.

/// Settings file looked up in the working directory when none is given.
pub const SETTINGS_FILE_DEFAULT: &str = "relay_settings.json";

/// Top-level keys a settings document may contain.
pub const TOP_LEVEL_FIELDS: &[&str] = &["name", "module_type_id", "visibility", "settings"];

/// Key of the module URL inside `settings`.
pub const URL_FIELD: &str = "url";

/// Key of the supported API list inside `settings`.
pub const SUPPORTED_APIS_FIELD: &str = "supported-apis";
