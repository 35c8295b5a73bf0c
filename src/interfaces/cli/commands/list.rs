//! List links command

use chrono::Utc;
use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkService;
use crate::utils::describe_expiry;

pub fn list_links(service: &LinkService, json: bool) -> Result<(), CliError> {
    let links = service.list();

    if json {
        let output = serde_json::to_string_pretty(&links)
            .map_err(|e| CliError::CommandError(format!("Failed to serialize links: {}", e)))?;
        println!("{}", output);
        return Ok(());
    }

    if links.is_empty() {
        println!("{} No short links stored", "ℹ".bold().blue());
        return Ok(());
    }

    let now = Utc::now();
    println!("{}", "Short link list:".bold().green());
    println!();
    for record in &links {
        let mut info_parts = vec![
            format!("[{}]", record.id).dimmed().to_string(),
            record.link.cyan().to_string(),
        ];

        if let Some(long_url) = &record.long_url {
            info_parts.push(format!("-> {}", long_url.blue().underline()));
        }

        let expiry = describe_expiry(record, now);
        info_parts.push(
            format!("(expires: {})", expiry)
                .dimmed()
                .yellow()
                .to_string(),
        );

        println!("  {}", info_parts.join(" "));
    }
    println!();
    println!(
        "{} Total {} short links",
        "ℹ".bold().blue(),
        links.len().to_string().green()
    );
    Ok(())
}
