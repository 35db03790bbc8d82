//! Relay settings for the Relay module manager.
//!
//! Loads the `relay_settings.json` document that declares the desired state
//! of a single relay module, checks it against a fixed schema and expands
//! `$VAR` / `${VAR}` placeholders from a caller-supplied variable source.
//!
//! ```no_run
//! use std::path::Path;
//! use relay_settings::{load_settings_file, env_lookup};
//!
//! let settings = load_settings_file(Path::new("relay_settings.json"), env_lookup)?;
//! println!("{}", settings.name);
//! # Ok::<(), relay_settings::Error>(())
//! ```

pub mod constants;
pub mod error;
pub mod expand;
pub mod loader;
pub mod schema;
pub mod settings;

pub use constants::SETTINGS_FILE_DEFAULT;
pub use error::{Error, Result};
pub use expand::{env_lookup, expand};
pub use loader::{load_settings, load_settings_file, load_settings_from_env};
pub use schema::{SchemaErrors, SupportedApi, validate};
pub use settings::{ModuleSettings, RelaySettings};
