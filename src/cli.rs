//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::storage::{ExpirationChoice, LinkId};

/// shortkeep - keep Bitly short links that expire on their own
#[derive(Parser, Debug)]
#[command(name = "shortkeep")]
#[command(version)]
#[command(about = "Shorten URLs via Bitly and keep them locally until they expire", long_about = None)]
pub struct Cli {
    /// Configuration file (default: shortkeep.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start TUI mode (default when no command is given)
    #[cfg(feature = "tui")]
    Tui,

    /// Shorten a URL and store the short link
    Shorten {
        /// Long URL to shorten
        url: String,

        /// Expiration: 1, 5, 30, 60, 300 (minutes) or 1m, 5m, 30m, 1h, 5h
        #[arg(long, short = 'e', value_parser = parse_expiration)]
        expire: Option<ExpirationChoice>,
    },

    /// List stored short links
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a stored short link by id
    Delete {
        /// Link id as shown by `list`
        id: LinkId,
    },

    /// Keep expiration timers running in the foreground until Ctrl-C
    Watch,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: shortkeep.example.toml)
        output_path: Option<String>,

        /// Force overwrite
        #[arg(long)]
        force: bool,
    },
}

fn parse_expiration(s: &str) -> Result<ExpirationChoice, String> {
    s.parse()
}
