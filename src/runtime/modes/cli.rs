//! CLI mode
//!
//! Delegates to the actual CLI implementation.

use crate::cli::Commands;
use crate::config::AppConfig;
use crate::interfaces::cli::CliError;

/// Run a single CLI command
pub async fn run_cli(config: &AppConfig, command: Commands) -> Result<(), CliError> {
    crate::interfaces::cli::run_cli_command(config, command).await
}
