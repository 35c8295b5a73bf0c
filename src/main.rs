use clap::Parser;

use shortkeep::cli::Cli;
use shortkeep::config::init_config;
use shortkeep::runtime::modes::{Mode, detect_mode};
use shortkeep::system::logging::{LogTarget, init_logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = init_config(cli.config.as_deref());

    let mode = detect_mode(cli.command.as_ref());
    #[allow(unreachable_patterns)]
    let target = match mode {
        #[cfg(feature = "tui")]
        Mode::Tui => LogTarget::FileOnly,
        _ => LogTarget::Console,
    };

    // 退出前保持存活，以便刷新缓冲中的日志
    let log_guard = match init_logging(&config.logging, target) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("[WARN] Failed to initialize logging: {}", e);
            None
        }
    };

    let exit_code = match mode {
        #[cfg(feature = "cli")]
        Mode::Cli => match cli.command {
            Some(command) => match shortkeep::runtime::modes::run_cli(config, command).await {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("{}", e.format_colored());
                    1
                }
            },
            None => 0,
        },
        #[cfg(feature = "tui")]
        Mode::Tui => match shortkeep::runtime::modes::run_tui(config).await {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("TUI error: {}", e);
                1
            }
        },
        Mode::Unknown => {
            eprintln!("No command given and TUI support is not compiled in; see --help");
            2
        }
    };

    drop(log_guard);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
