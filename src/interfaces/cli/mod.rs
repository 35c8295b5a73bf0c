//! CLI interface module
//!
//! One-shot commands plus `watch`, all going through the link service.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::AppConfig;
use crate::errors::ShortkeepError;
use crate::runtime::lifetime::startup::prepare_link_service;
use commands::{config_generate, delete_link, list_links, shorten_link, watch_links};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ValidationError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ValidationError(msg) => format!("Invalid input: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ValidationError(msg) => {
                format!("{} {}", "Invalid input:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<ShortkeepError> for CliError {
    fn from(err: ShortkeepError) -> Self {
        match err {
            ShortkeepError::Validation(msg) => CliError::ValidationError(msg),
            ShortkeepError::FileOperation(_) | ShortkeepError::Serialization(_) => {
                CliError::StorageError(err.to_string())
            }
            other => CliError::CommandError(other.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(config: &AppConfig, cmd: Commands) -> Result<(), CliError> {
    // config generate 不需要加载链接
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force);
    }

    let service =
        prepare_link_service(config).map_err(|e| CliError::StorageError(format!("{:#}", e)))?;

    let result = match cmd {
        Commands::Shorten { url, expire } => shorten_link(&service, url, expire).await,
        Commands::List { json } => list_links(&service, json),
        Commands::Delete { id } => delete_link(&service, id),
        Commands::Watch => watch_links(&service).await,
        #[cfg(feature = "tui")]
        Commands::Tui => Err(CliError::CommandError(
            "TUI mode cannot be run as a CLI command".to_string(),
        )),
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force),
    };

    service.shutdown();
    result
}
