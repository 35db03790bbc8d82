//! Error types for relay-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from relay-settings
    #[error(transparent)]
    Settings(#[from] relay_settings::Error),

    /// Error from relay-core
    #[error(transparent)]
    Core(#[from] relay_core::Error),

    /// Error from relay-client
    #[error(transparent)]
    Client(#[from] relay_client::ClientError),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
