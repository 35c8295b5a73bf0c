//! Link service
//!
//! The single entry point the CLI and TUI use. It owns the link store, the
//! expiration scheduler and the shortening client, and keeps the three in
//! step: a stored record with an expiration always has exactly one armed
//! timer, and removing a record disarms its timer in the same critical
//! section.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use super::expiration::{ArmToken, ExpirationScheduler};
use super::shortener::Shortener;
use crate::errors::{Result, ShortkeepError};
use crate::storage::{ExpirationChoice, LinkId, LinkRecord, LinkStore};

/// Shown when a submission lacks a URL or an expiration choice
pub const VALIDATION_MESSAGE: &str = "Please select an expiration time and provide a URL.";

/// How often long-running modes pick up links written by other processes
pub const SYNC_INTERVAL: Duration = Duration::from_secs(2);

/// Delay before retrying an expiration whose removal could not be persisted
pub const EXPIRE_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Lifecycle of one form submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Rejected(String),
    Requesting,
    Succeeded(LinkId),
    Failed,
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Requesting)
    }
}

/// Outcome of re-arming timers after a (re)load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RearmReport {
    pub armed: usize,
    /// Records whose deadline had already passed and were removed
    pub expired: usize,
}

pub struct LinkService {
    store: Mutex<LinkStore>,
    scheduler: ExpirationScheduler,
    shortener: Arc<dyn Shortener>,
    /// shutdown 之后不再布置新的定时器
    closed: AtomicBool,
    this: Weak<LinkService>,
}

impl LinkService {
    pub fn new(store: LinkStore, shortener: Arc<dyn Shortener>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            store: Mutex::new(store),
            scheduler: ExpirationScheduler::new(),
            shortener,
            closed: AtomicBool::new(false),
            this: this.clone(),
        })
    }

    /// Load the persisted collection and arm every expiring record
    ///
    /// Must be called from within a tokio runtime.
    pub fn load_and_arm(&self) -> Result<RearmReport> {
        {
            let mut store = self.store.lock();
            // 旧集合的定时器随集合一起作废
            self.scheduler.cancel_all();
            self.closed.store(false, Ordering::SeqCst);
            store.load()?;
        }
        self.rearm_all()
    }

    /// Arm timers for every expiring record that has none yet
    ///
    /// Records with an absolute deadline get the time that is left; those
    /// already past it are removed right away. Records without one restart
    /// their full duration.
    pub fn rearm_all(&self) -> Result<RearmReport> {
        let mut store = self.store.lock();
        self.sync_timers(&mut store)
    }

    /// Re-read the persisted collection and arm links added by other processes
    pub fn sync(&self) -> Result<RearmReport> {
        let mut store = self.store.lock();
        store.refresh()?;
        self.sync_timers(&mut store)
    }

    /// 让定时器与 store 当前内容一致；调用方持有 store 锁
    fn sync_timers(&self, store: &mut LinkStore) -> Result<RearmReport> {
        let mut report = RearmReport::default();
        if self.closed.load(Ordering::SeqCst) {
            return Ok(report);
        }
        let now = Utc::now();

        for id in self.scheduler.scheduled_ids() {
            if store.get(id).is_none() {
                self.scheduler.cancel(id);
            }
        }

        let unarmed: Vec<LinkRecord> = store
            .list()
            .iter()
            .filter(|r| r.expires() && !self.scheduler.is_scheduled(r.id))
            .cloned()
            .collect();
        for record in unarmed {
            let overdue = record.expires_at.is_some_and(|deadline| deadline <= now);
            if overdue {
                if store.remove(record.id)? {
                    report.expired += 1;
                    info!("Link {} ({}) expired while away, removed", record.id, record.link);
                }
            } else if let Some(delay) = record.remaining(now) {
                self.arm(record.id, delay);
                report.armed += 1;
            }
        }

        if report != RearmReport::default() {
            debug!(
                "Armed {} expirations, swept {} overdue links",
                report.armed, report.expired
            );
        }
        Ok(report)
    }

    /// Check a submission before any network call
    pub fn validate(
        long_url: &str,
        expiration: Option<ExpirationChoice>,
    ) -> Result<(String, ExpirationChoice)> {
        let long_url = long_url.trim();
        match expiration {
            Some(choice) if !long_url.is_empty() => Ok((long_url.to_string(), choice)),
            _ => Err(ShortkeepError::validation(VALIDATION_MESSAGE)),
        }
    }

    /// Shorten `long_url`, store the result and arm its expiration
    ///
    /// Validation failures come back as `ShortkeepError::Validation` with no
    /// side effects. Service failures are logged and leave state unchanged.
    pub async fn submit(
        &self,
        long_url: &str,
        expiration: Option<ExpirationChoice>,
    ) -> Result<LinkRecord> {
        let (long_url, choice) = Self::validate(long_url, expiration)?;

        let link = match self.shortener.shorten(&long_url).await {
            Ok(link) => link,
            Err(e) => {
                error!("Shortening {} via {} failed: {}", long_url, self.shortener.name(), e);
                return Err(e);
            }
        };

        let record = {
            let mut store = self.store.lock();
            let now = Utc::now();
            let id = store.next_id(now);
            let record = LinkRecord::new(id, link.clone(), Some(long_url), Some(choice), now);
            let record = match store.add(record) {
                Ok(record) => record,
                Err(e) => {
                    error!("Failed to persist link {}: {}", link, e);
                    return Err(e);
                }
            };
            if let Some(delay) = record.expiration_duration() {
                self.arm(record.id, delay);
            }
            self.adopt_foreign(&mut store);
            record
        };

        info!(
            "Stored link {} -> {} (expires in {})",
            record.id, record.link, choice
        );
        Ok(record)
    }

    /// Remove a record at the user's request and disarm its timer
    ///
    /// Returns whether a record was removed; an unknown id is a no-op.
    pub fn remove(&self, id: LinkId) -> Result<bool> {
        let mut store = self.store.lock();
        let removed = store.remove(id)?;
        self.scheduler.cancel(id);
        if removed {
            info!("Link {} removed", id);
        }
        self.adopt_foreign(&mut store);
        Ok(removed)
    }

    /// Timer callback: remove `id` if `token` is still its current arming
    pub fn expire(&self, id: LinkId, token: ArmToken) {
        if !self.scheduler.complete(id, token) {
            debug!("Stale expiration for link {} ignored", id);
            return;
        }

        let mut store = self.store.lock();
        match store.remove(id) {
            Ok(true) => info!("Link {} expired and was removed", id),
            Ok(false) => debug!("Link {} already gone when it expired", id),
            Err(e) => {
                error!(
                    "Failed to remove expired link {}: {}, retrying in {:?}",
                    id, e, EXPIRE_RETRY_DELAY
                );
                self.arm(id, EXPIRE_RETRY_DELAY);
                return;
            }
        }
        self.adopt_foreign(&mut store);
    }

    /// 每次写入都会重读集合，顺带给其他进程新增的链接布置定时器
    fn adopt_foreign(&self, store: &mut LinkStore) {
        if let Err(e) = self.sync_timers(store) {
            warn!("Failed to arm links stored by another process: {}", e);
        }
    }

    fn arm(&self, id: LinkId, delay: Duration) {
        let service = self.this.clone();
        self.scheduler.schedule(id, delay, move |token| {
            if let Some(service) = service.upgrade() {
                service.expire(id, token);
            }
        });
    }

    pub fn list(&self) -> Vec<LinkRecord> {
        self.store.lock().list().to_vec()
    }

    pub fn get(&self, id: LinkId) -> Option<LinkRecord> {
        self.store.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn is_scheduled(&self, id: LinkId) -> bool {
        self.scheduler.is_scheduled(id)
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.lock().backend_name()
    }

    /// Disarm every timer; stored records are kept
    pub fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
        let pending = self.scheduler.pending();
        self.scheduler.cancel_all();
        if pending > 0 {
            warn!("Shutting down with {} pending expirations", pending);
        }
    }
}
