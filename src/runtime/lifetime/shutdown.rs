use tokio::signal;
use tracing::{info, warn};

use crate::services::LinkService;

/// Wait for Ctrl+C, then disarm pending timers
pub async fn listen_for_shutdown(service: &LinkService) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    service.shutdown();
}
