//! Startup wiring
//!
//! Builds the link service from configuration, loads persisted links and
//! arms their expirations.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::services::{BitlyClient, LinkService, Shortener};
use crate::storage::StorageFactory;

/// Create the link service, load the store and arm every expiration
///
/// Must be called from within a tokio runtime.
pub fn prepare_link_service(config: &AppConfig) -> Result<Arc<LinkService>> {
    let start_time = std::time::Instant::now();

    let store = StorageFactory::create(&config.storage);
    let shortener: Arc<dyn Shortener> = Arc::new(BitlyClient::new(&config.shortener));
    if config.shortener.access_token.trim().is_empty() {
        warn!("No Bitly access token configured; shortening requests will fail");
    }

    let service = LinkService::new(store, shortener);
    let report = service
        .load_and_arm()
        .context("Failed to load stored links")?;

    info!(
        "Using {} storage with {} links ({} expirations armed, {} overdue removed)",
        service.backend_name(),
        service.len(),
        report.armed,
        report.expired
    );
    debug!("Startup completed in {:?}", start_time.elapsed());

    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.data_dir = dir.path().to_string_lossy().to_string();
        config
    }

    #[tokio::test]
    async fn test_prepare_with_empty_dir() {
        let dir = TempDir::new().unwrap();
        let service = prepare_link_service(&config_in(&dir)).unwrap();

        assert!(service.is_empty());
        assert_eq!(service.backend_name(), "file");
        assert_eq!(service.scheduled_count(), 0);
    }

    #[tokio::test]
    async fn test_prepare_arms_stored_links() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("shortenedLinks.json"),
            r#"[{"id":1,"link":"https://bit.ly/a","expirationTime":5},{"id":2,"link":"https://bit.ly/b"}]"#,
        )
        .unwrap();

        let service = prepare_link_service(&config_in(&dir)).unwrap();
        assert_eq!(service.len(), 2);
        assert!(service.is_scheduled(1));
        assert!(!service.is_scheduled(2));
        service.shutdown();
    }

    #[tokio::test]
    async fn test_prepare_rejects_invalid_storage_key() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.storage.key = "../escape".to_string();

        assert!(prepare_link_service(&config).is_err());
    }
}
