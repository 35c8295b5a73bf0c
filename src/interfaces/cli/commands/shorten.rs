//! Shorten command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkService;
use crate::storage::ExpirationChoice;

pub async fn shorten_link(
    service: &LinkService,
    url: String,
    expire: Option<ExpirationChoice>,
) -> Result<(), CliError> {
    let record = service.submit(&url, expire).await?;

    println!(
        "{} Shortened: {} -> {}",
        "✓".bold().green(),
        record.link.cyan(),
        url.trim().blue().underline()
    );
    if let Some(choice) = expire {
        println!(
            "  {} {}",
            "Expires in".dimmed(),
            choice.to_string().yellow()
        );
    }
    println!("  {} {}", "Id:".dimmed(), record.id.to_string().cyan());
    println!(
        "{} Expired links are removed while `shortkeep watch` or the TUI is running, or at next start",
        "ℹ".bold().blue()
    );
    Ok(())
}
