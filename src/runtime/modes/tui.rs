//! TUI mode
//!
//! Wires the link service and hands it to the terminal interface.

use crate::config::AppConfig;
use crate::runtime::lifetime::startup::prepare_link_service;

/// Run TUI mode
pub async fn run_tui(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = prepare_link_service(config)?;
    let result = crate::interfaces::tui::run_tui(service.clone()).await;
    service.shutdown();
    result
}
