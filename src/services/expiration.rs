//! One-shot, cancellable expiration timers keyed by link id
//!
//! Each armed timer is a tokio task sleeping for its delay. A firing task
//! hands its arming token to the callback; the callback must call
//! [`ExpirationScheduler::complete`] so only the current arming acts.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::storage::LinkId;

/// Identifies one arming of a timer
pub type ArmToken = u64;

struct ScheduledRemoval {
    token: ArmToken,
    handle: JoinHandle<()>,
}

#[derive(Default)]
pub struct ExpirationScheduler {
    pending: Mutex<HashMap<LinkId, ScheduledRemoval>>,
    next_token: AtomicU64,
}

impl ExpirationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer for `id`; an existing one for the same id is aborted first
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, id: LinkId, delay: Duration, on_fire: F) -> ArmToken
    where
        F: FnOnce(ArmToken) + Send + 'static,
    {
        // 持锁期间 spawn：零延迟的任务在 complete() 处等待，直到句柄已登记
        let mut pending = self.pending.lock();
        let token = self.next_token.fetch_add(1, Ordering::Relaxed) + 1;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!("Expiration timer for link {} fired", id);
            on_fire(token);
        });

        if let Some(previous) = pending.insert(id, ScheduledRemoval { token, handle }) {
            previous.handle.abort();
            debug!("Re-armed expiration for link {}", id);
        } else {
            debug!("Armed expiration for link {} in {:?}", id, delay);
        }
        token
    }

    /// Abort and discard the pending timer for `id`; idempotent
    pub fn cancel(&self, id: LinkId) -> bool {
        match self.pending.lock().remove(&id) {
            Some(scheduled) => {
                scheduled.handle.abort();
                debug!("Cancelled expiration for link {}", id);
                true
            }
            None => false,
        }
    }

    /// Called by a firing timer; discards the handle only for the current arming
    ///
    /// Returns `false` for a stale token, in which case the caller must not act.
    pub fn complete(&self, id: LinkId, token: ArmToken) -> bool {
        let mut pending = self.pending.lock();
        match pending.get(&id) {
            Some(scheduled) if scheduled.token == token => {
                pending.remove(&id);
                true
            }
            _ => false,
        }
    }

    pub fn is_scheduled(&self, id: LinkId) -> bool {
        self.pending.lock().contains_key(&id)
    }

    pub fn scheduled_ids(&self) -> Vec<LinkId> {
        self.pending.lock().keys().copied().collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn cancel_all(&self) {
        let mut pending = self.pending.lock();
        for (_, scheduled) in pending.drain() {
            scheduled.handle.abort();
        }
    }
}

impl Drop for ExpirationScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
