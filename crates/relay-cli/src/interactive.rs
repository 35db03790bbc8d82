//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for credentials that were not given as flags or
//! environment variables.

use dialoguer::{Input, Password};
use relay_client::Credentials;

use crate::error::Result;

/// Fill in missing credentials by prompting. The secret is never echoed.
pub fn resolve_credentials(
    client_id: Option<String>,
    client_password: Option<String>,
) -> Result<Credentials> {
    let client_id = match client_id {
        Some(id) => id,
        None => Input::<String>::new().with_prompt("Client ID").interact_text()?,
    };

    let client_secret = match client_password {
        Some(password) => password,
        None => Password::new().with_prompt("Client Password").interact()?,
    };

    Ok(Credentials::new(client_id, client_secret))
}
