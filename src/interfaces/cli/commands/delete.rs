//! Delete link command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::LinkService;
use crate::storage::LinkId;

pub fn delete_link(service: &LinkService, id: LinkId) -> Result<(), CliError> {
    let link = service.get(id).map(|r| r.link);

    if service.remove(id)? {
        println!(
            "{} Deleted short link: {}",
            "✓".bold().green(),
            link.unwrap_or_else(|| id.to_string()).cyan()
        );
    } else {
        // 未知 id 不算错误
        println!(
            "{} No short link with id {}",
            "ℹ".bold().blue(),
            id.to_string().cyan()
        );
    }
    Ok(())
}
