//! Service layer
//!
//! - `expiration`: cancellable one-shot removal timers
//! - `shortener`: external shortening API client
//! - `link_service`: facade tying store, scheduler and client together

pub mod expiration;
pub mod link_service;
pub mod shortener;

pub use expiration::{ArmToken, ExpirationScheduler};
pub use link_service::{
    EXPIRE_RETRY_DELAY, LinkService, RearmReport, SYNC_INTERVAL, SubmissionState,
    VALIDATION_MESSAGE,
};
pub use shortener::{BitlyClient, Shortener};
