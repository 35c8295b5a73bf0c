//! Watch command: keep expiration timers alive in the foreground

use colored::Colorize;
use tokio::time::{MissedTickBehavior, interval};
use tracing::warn;

use crate::interfaces::cli::CliError;
use crate::runtime::lifetime::shutdown::listen_for_shutdown;
use crate::services::{LinkService, SYNC_INTERVAL};

pub async fn watch_links(service: &LinkService) -> Result<(), CliError> {
    println!(
        "{} Watching {} links ({} expirations pending), press Ctrl-C to stop",
        "ℹ".bold().blue(),
        service.len().to_string().green(),
        service.scheduled_count().to_string().yellow()
    );

    let mut ticker = interval(SYNC_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let shutdown = listen_for_shutdown(service);
    tokio::pin!(shutdown);

    // 定期接管其他进程（如一次性的 shorten）写入的链接
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                if let Err(e) = service.sync() {
                    warn!("Failed to re-read stored links: {}", e);
                }
            }
        }
    }

    println!(
        "{} Stopped, {} links kept",
        "✓".bold().green(),
        service.len().to_string().green()
    );
    Ok(())
}
