//! Device-local persistence of link records

pub mod backend;
pub mod link_store;
pub mod models;

pub use backend::{FileLocalStorage, LocalStorage, MemoryLocalStorage};
pub use link_store::LinkStore;
pub use models::{ExpirationChoice, LinkId, LinkRecord};

use std::sync::Arc;

use tracing::debug;

use crate::config::StorageConfig;

/// Build the storage adapter described by the config
pub struct StorageFactory;

impl StorageFactory {
    pub fn create(config: &StorageConfig) -> LinkStore {
        debug!("Using file storage at {}", config.data_dir);
        let backend: Arc<dyn LocalStorage> = Arc::new(FileLocalStorage::new(&config.data_dir));
        LinkStore::new(backend, config.key.clone())
    }
}
