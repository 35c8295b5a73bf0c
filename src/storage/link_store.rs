//! Ordered collection of link records over a `LocalStorage` adapter
//!
//! Every mutation re-reads the persisted collection, applies its change and
//! writes the whole collection back under one key, so several processes can
//! share one data directory. There are no partial or delta writes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::backend::LocalStorage;
use super::models::{LinkId, LinkRecord};
use crate::errors::Result;

pub struct LinkStore {
    backend: Arc<dyn LocalStorage>,
    key: String,
    links: Vec<LinkRecord>,
    last_id: LinkId,
}

impl LinkStore {
    /// Create an empty store; call [`LinkStore::load`] to read persisted links
    pub fn new(backend: Arc<dyn LocalStorage>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            links: Vec::new(),
            last_id: 0,
        }
    }

    /// Read the persisted collection, replacing what is in memory
    ///
    /// Absent or malformed content yields an empty collection. Malformed
    /// content is left on disk until the next mutation overwrites it.
    pub fn load(&mut self) -> Result<&[LinkRecord]> {
        self.links = self.read_persisted()?;
        self.last_id = self.links.iter().map(|l| l.id).max().unwrap_or(0);
        info!(
            "Loaded {} links from {} storage",
            self.links.len(),
            self.backend.backend_name()
        );
        Ok(&self.links)
    }

    /// Pick up writes made by other processes sharing the same key
    ///
    /// Unlike [`LinkStore::load`], ids already handed out stay reserved.
    pub fn refresh(&mut self) -> Result<()> {
        let links = self.read_persisted()?;
        if links != self.links {
            debug!(
                "Stored links under '{}' changed elsewhere ({} -> {})",
                self.key,
                self.links.len(),
                links.len()
            );
        }
        let max_id = links.iter().map(|l| l.id).max().unwrap_or(0);
        self.last_id = self.last_id.max(max_id);
        self.links = links;
        Ok(())
    }

    fn read_persisted(&self) -> Result<Vec<LinkRecord>> {
        let links = match self.backend.get_item(&self.key)? {
            None => {
                debug!("No stored links under '{}'", self.key);
                Vec::new()
            }
            Some(content) if content.trim().is_empty() => Vec::new(),
            Some(content) => match serde_json::from_str::<Vec<LinkRecord>>(&content) {
                Ok(links) => dedup_ids(links),
                Err(e) => {
                    warn!(
                        "Stored links under '{}' are malformed ({}), starting empty",
                        self.key, e
                    );
                    Vec::new()
                }
            },
        };
        Ok(links)
    }

    /// Allocate a unique id from the wall clock
    ///
    /// Two ids taken in the same millisecond (or after a clock step back)
    /// continue from the last one handed out.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> LinkId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;
        id
    }

    /// Append to the latest persisted collection and write it back
    ///
    /// Returns the stored record. If another process already took its id,
    /// the record gets the next free one. On a persistence failure the
    /// in-memory collection is rolled back so both sides stay equal.
    pub fn add(&mut self, mut record: LinkRecord) -> Result<LinkRecord> {
        self.refresh()?;
        if self.get(record.id).is_some() {
            record.id = self.last_id + 1;
        }
        self.last_id = self.last_id.max(record.id);
        self.links.push(record.clone());
        if let Err(e) = self.persist() {
            self.links.pop();
            return Err(e);
        }
        Ok(record)
    }

    /// Remove `id` from the latest persisted collection and write it back
    ///
    /// Returns whether a record was removed; an unknown id writes nothing.
    pub fn remove(&mut self, id: LinkId) -> Result<bool> {
        self.refresh()?;
        let Some(pos) = self.links.iter().position(|l| l.id == id) else {
            debug!("Remove of unknown link {} ignored", id);
            return Ok(false);
        };
        let removed = self.links.remove(pos);
        if let Err(e) = self.persist() {
            self.links.insert(pos, removed);
            return Err(e);
        }
        Ok(true)
    }

    pub fn list(&self) -> &[LinkRecord] {
        &self.links
    }

    pub fn get(&self, id: LinkId) -> Option<&LinkRecord> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.links)?;
        self.backend.set_item(&self.key, &json)
    }
}

/// Keep the first record for each id
fn dedup_ids(links: Vec<LinkRecord>) -> Vec<LinkRecord> {
    let mut seen = std::collections::HashSet::new();
    let before = links.len();
    let links: Vec<LinkRecord> = links.into_iter().filter(|l| seen.insert(l.id)).collect();
    if links.len() != before {
        warn!("Dropped {} stored links with duplicate ids", before - links.len());
    }
    links
}
