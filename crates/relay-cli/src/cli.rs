//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use relay_client::Region;
use relay_core::Operation;
use relay_settings::SETTINGS_FILE_DEFAULT;

/// Environment variable holding the API client id
pub const CLIENT_ID_ENVVAR: &str = "TR_API_CLIENT_ID";

/// Environment variable holding the API client password
pub const CLIENT_PASSWORD_ENVVAR: &str = "TR_API_CLIENT_PASSWORD";

/// Environment variable selecting the Threat Response region
pub const REGION_ENVVAR: &str = "TR_API_REGION";

/// Relay - Manage Threat Response relay modules from a settings file
#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add the relay module described by the settings file
    ///
    /// Fails if a module with the same name and module type already exists.
    ///
    /// Examples:
    ///   relay add                           # Use ./relay_settings.json
    ///   relay add -f prod_settings.json     # Use another settings file
    ///   relay add --dry-run                 # Preview without changing
    Add(ModuleArgs),

    /// Edit the existing relay module to match the settings file
    ///
    /// Only top-level fields that differ are sent.
    Edit(ModuleArgs),

    /// Remove the relay module described by the settings file
    Remove(ModuleArgs),
}

impl Commands {
    pub fn operation(&self) -> Operation {
        match self {
            Commands::Add(_) => Operation::Add,
            Commands::Edit(_) => Operation::Edit,
            Commands::Remove(_) => Operation::Remove,
        }
    }

    pub fn args(&self) -> &ModuleArgs {
        match self {
            Commands::Add(args) | Commands::Edit(args) | Commands::Remove(args) => args,
        }
    }
}

/// Options shared by every module command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ModuleArgs {
    /// The ID of a Threat Response API client
    #[arg(
        short = 'i',
        long = "client_id",
        visible_alias = "client-id",
        env = CLIENT_ID_ENVVAR
    )]
    pub client_id: Option<String>,

    /// The password of a Threat Response API client
    #[arg(
        short = 'p',
        long = "client_password",
        visible_alias = "client-password",
        env = CLIENT_PASSWORD_ENVVAR,
        hide_env_values = true
    )]
    pub client_password: Option<String>,

    /// The path to a Relay settings file
    #[arg(
        short = 'f',
        long = "settings_file",
        visible_alias = "settings-file",
        default_value = SETTINGS_FILE_DEFAULT
    )]
    pub settings_file: PathBuf,

    /// Threat Response region (us, eu or apjc)
    #[arg(long, env = REGION_ENVVAR, default_value = "us")]
    pub region: Region,

    /// Show the planned change without applying it
    #[arg(long)]
    pub dry_run: bool,
}
