//! Error types for relay-settings

use std::path::PathBuf;

use crate::schema::SchemaErrors;

/// Result type for relay-settings operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a Relay settings document.
///
/// Everything except [`Error::Io`] is a validation failure of the document
/// itself: the file could be read but its content is unusable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to load Relay settings JSON file. It may be malformed: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid Relay settings JSON schema:\n{0}")]
    Schema(SchemaErrors),

    #[error(
        "Unable to read environment variable \"{name}\" for Relay settings JSON expansion. \
         Make sure to define it first."
    )]
    MissingVariable { name: String },

    #[error("Invalid placeholder in \"{text}\" at position {position}. Use \"$$\" for a literal \"$\".")]
    InvalidPlaceholder { text: String, position: usize },

    #[error("Unable to open Relay settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error comes from the document content rather than from
    /// reaching the file.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}
