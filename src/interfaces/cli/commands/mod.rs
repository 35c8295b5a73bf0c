//! CLI command implementations

mod config_gen;
mod delete;
mod list;
mod shorten;
mod watch;

pub use config_gen::config_generate;
pub use delete::delete_link;
pub use list::list_links;
pub use shorten::shorten_link;
pub use watch::watch_links;
