//! Client error types.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to Threat Response.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Credentials were rejected.
    #[error("Unable to authenticate with Threat Response ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    /// The API answered with a non-success status.
    #[error("Threat Response API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Unknown region name.
    #[error("Unknown Threat Response region \"{0}\" (expected us, eu or apjc)")]
    InvalidRegion(String),
}
