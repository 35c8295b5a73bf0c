//! LinkService tests
//!
//! Submission, deletion, expiration and reload behaviour against in-memory
//! storage and a counting fake shortener. Timer tests run with paused time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use shortkeep::errors::{Result, ShortkeepError};
use shortkeep::services::{EXPIRE_RETRY_DELAY, LinkService, Shortener, VALIDATION_MESSAGE};
use shortkeep::storage::{
    ExpirationChoice, FileLocalStorage, LinkRecord, LinkStore, LocalStorage, MemoryLocalStorage,
};
use tempfile::TempDir;

const KEY: &str = "shortenedLinks";

// =============================================================================
// Test Setup
// =============================================================================

/// Fake shortener that counts calls
struct FakeShortener {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeShortener {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Shortener for FakeShortener {
    async fn shorten(&self, _long_url: &str) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ShortkeepError::shortener("403 Forbidden"));
        }
        Ok(format!("https://bit.ly/fake{}", n))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

fn service_with(
    backend: Arc<MemoryLocalStorage>,
    shortener: Arc<FakeShortener>,
) -> Arc<LinkService> {
    LinkService::new(LinkStore::new(backend, KEY), shortener)
}

fn persisted(backend: &MemoryLocalStorage) -> Vec<LinkRecord> {
    match backend.get_item(KEY).unwrap() {
        Some(raw) => serde_json::from_str(&raw).unwrap(),
        None => Vec::new(),
    }
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_valid_submission_appends_persists_and_arms() {
    let backend = Arc::new(MemoryLocalStorage::new());
    let shortener = FakeShortener::ok();
    let service = service_with(backend.clone(), shortener.clone());

    let record = service
        .submit("https://example.com", Some(ExpirationChoice::FiveMinutes))
        .await
        .unwrap();

    assert_eq!(shortener.calls(), 1);
    assert_eq!(record.link, "https://bit.ly/fake0");
    assert_eq!(record.expiration_time, Some(5));
    assert_eq!(record.long_url.as_deref(), Some("https://example.com"));

    assert_eq!(service.list(), vec![record.clone()]);
    assert_eq!(persisted(&backend), vec![record.clone()]);
    assert!(service.is_scheduled(record.id));
    assert_eq!(service.scheduled_count(), 1);
}

#[tokio::test]
async fn test_missing_inputs_make_no_call() {
    let backend = Arc::new(MemoryLocalStorage::new());
    let shortener = FakeShortener::ok();
    let service = service_with(backend.clone(), shortener.clone());

    let cases = [
        ("", Some(ExpirationChoice::FiveMinutes)),
        ("   ", Some(ExpirationChoice::OneHour)),
        ("https://example.com", None),
        ("", None),
    ];
    for (url, choice) in cases {
        let err = service.submit(url, choice).await.unwrap_err();
        assert_eq!(err, ShortkeepError::Validation(VALIDATION_MESSAGE.to_string()));
    }

    assert_eq!(shortener.calls(), 0);
    assert!(service.is_empty());
    assert_eq!(service.scheduled_count(), 0);
    assert!(backend.get_item(KEY).unwrap().is_none());
}

/// Empty URL with 5 minutes selected
#[tokio::test]
async fn test_scenario_empty_url_shows_message() {
    let shortener = FakeShortener::ok();
    let service = service_with(Arc::new(MemoryLocalStorage::new()), shortener.clone());

    let err = service
        .submit("", Some(ExpirationChoice::FiveMinutes))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(
        err.message(),
        "Please select an expiration time and provide a URL."
    );
    assert_eq!(shortener.calls(), 0);
}

#[tokio::test]
async fn test_shortener_failure_leaves_state_unchanged() {
    let backend = Arc::new(MemoryLocalStorage::new());
    let shortener = FakeShortener::failing();
    let service = service_with(backend.clone(), shortener.clone());

    let err = service
        .submit("https://example.com", Some(ExpirationChoice::OneMinute))
        .await
        .unwrap_err();

    assert!(matches!(err, ShortkeepError::Shortener(_)));
    assert_eq!(shortener.calls(), 1);
    assert!(service.is_empty());
    assert_eq!(service.scheduled_count(), 0);
    assert!(backend.get_item(KEY).unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_ids_unique_for_rapid_submissions() {
    let service = service_with(Arc::new(MemoryLocalStorage::new()), FakeShortener::ok());

    for _ in 0..5 {
        service
            .submit("https://example.com", Some(ExpirationChoice::OneHour))
            .await
            .unwrap();
    }

    let mut ids: Vec<u64> = service.list().iter().map(|r| r.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 5);
    assert_eq!(service.scheduled_count(), 5);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_delete_removes_record_and_cancels_timer() {
    let backend = Arc::new(MemoryLocalStorage::new());
    let service = service_with(backend.clone(), FakeShortener::ok());

    let keep = service
        .submit("https://a.example", Some(ExpirationChoice::OneHour))
        .await
        .unwrap();
    let gone = service
        .submit("https://b.example", Some(ExpirationChoice::OneMinute))
        .await
        .unwrap();

    assert!(service.remove(gone.id).unwrap());

    assert_eq!(service.list(), vec![keep.clone()]);
    assert_eq!(persisted(&backend), vec![keep.clone()]);
    assert!(!service.is_scheduled(gone.id));
    assert!(service.is_scheduled(keep.id));

    // 被取消的定时器不会再触发
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(service.list(), vec![keep]);
}

#[tokio::test]
async fn test_delete_unknown_id_is_noop() {
    let backend = Arc::new(MemoryLocalStorage::new());
    let service = service_with(backend.clone(), FakeShortener::ok());

    assert!(!service.remove(42).unwrap());
    assert!(service.is_empty());
    assert!(backend.get_item(KEY).unwrap().is_none());
}

// =============================================================================
// Expiration
// =============================================================================

/// https://example.com with 1 minute, then 60 simulated seconds
#[tokio::test(start_paused = true)]
async fn test_scenario_one_minute_link_expires() {
    let backend = Arc::new(MemoryLocalStorage::new());
    let service = service_with(backend.clone(), FakeShortener::ok());

    let record = service
        .submit("https://example.com", Some(ExpirationChoice::OneMinute))
        .await
        .unwrap();
    assert_eq!(service.len(), 1);

    tokio::time::sleep(Duration::from_secs(59)).await;
    assert_eq!(service.len(), 1);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(service.get(record.id).is_none());
    assert!(service.is_empty());
    assert!(persisted(&backend).is_empty());
    assert!(!service.is_scheduled(record.id));
}

#[tokio::test(start_paused = true)]
async fn test_expiration_only_removes_its_own_record() {
    let backend = Arc::new(MemoryLocalStorage::new());
    let service = service_with(backend.clone(), FakeShortener::ok());

    let short = service
        .submit("https://a.example", Some(ExpirationChoice::OneMinute))
        .await
        .unwrap();
    let long = service
        .submit("https://b.example", Some(ExpirationChoice::FiveMinutes))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert!(service.get(short.id).is_none());
    assert_eq!(persisted(&backend), vec![long.clone()]);

    tokio::time::sleep(Duration::from_secs(240)).await;
    assert!(service.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_expiration_after_user_delete_is_silent() {
    let backend = Arc::new(MemoryLocalStorage::new());
    let service = service_with(backend.clone(), FakeShortener::ok());

    let record = service
        .submit("https://example.com", Some(ExpirationChoice::OneMinute))
        .await
        .unwrap();
    service.remove(record.id).unwrap();

    // 用户删除后重新写入一条同 id 的记录，定时器也不能误删它
    let again = LinkRecord::new(
        record.id,
        record.link.clone(),
        record.long_url.clone(),
        None,
        Utc::now(),
    );
    backend
        .set_item(KEY, &serde_json::to_string(&vec![again.clone()]).unwrap())
        .unwrap();
    service.load_and_arm().unwrap();

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(service.list(), vec![again]);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_disarms_but_keeps_records() {
    let backend = Arc::new(MemoryLocalStorage::new());
    let service = service_with(backend.clone(), FakeShortener::ok());

    service
        .submit("https://example.com", Some(ExpirationChoice::OneMinute))
        .await
        .unwrap();
    service.shutdown();
    assert_eq!(service.scheduled_count(), 0);

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(service.len(), 1);
    assert_eq!(persisted(&backend).len(), 1);
}

// =============================================================================
// Reload
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_reload_round_trip_rearms() {
    let backend = Arc::new(MemoryLocalStorage::new());
    let first = service_with(backend.clone(), FakeShortener::ok());

    first
        .submit("https://a.example", Some(ExpirationChoice::ThirtyMinutes))
        .await
        .unwrap();
    first
        .submit("https://b.example", Some(ExpirationChoice::FiveHours))
        .await
        .unwrap();
    let before = first.list();
    first.shutdown();
    drop(first);

    let second = service_with(backend.clone(), FakeShortener::ok());
    let report = second.load_and_arm().unwrap();

    assert_eq!(report.armed, 2);
    assert_eq!(report.expired, 0);
    let after = second.list();
    assert_eq!(after.len(), before.len());
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.link, b.link);
        assert_eq!(a.expiration_time, b.expiration_time);
        assert!(second.is_scheduled(b.id));
    }
}

#[tokio::test(start_paused = true)]
async fn test_reload_sweeps_overdue_records() {
    let backend = Arc::new(MemoryLocalStorage::new());
    let past = Utc::now() - chrono::Duration::minutes(10);
    let overdue = LinkRecord::new(
        1,
        "https://bit.ly/old".to_string(),
        None,
        Some(ExpirationChoice::FiveMinutes),
        past,
    );
    let fresh = LinkRecord::new(
        2,
        "https://bit.ly/new".to_string(),
        None,
        Some(ExpirationChoice::OneHour),
        Utc::now(),
    );
    backend
        .set_item(
            KEY,
            &serde_json::to_string(&vec![overdue, fresh.clone()]).unwrap(),
        )
        .unwrap();

    let service = service_with(backend.clone(), FakeShortener::ok());
    let report = service.load_and_arm().unwrap();

    assert_eq!(report.expired, 1);
    assert_eq!(report.armed, 1);
    assert_eq!(service.list(), vec![fresh.clone()]);
    assert_eq!(persisted(&backend), vec![fresh]);
}

#[tokio::test(start_paused = true)]
async fn test_legacy_records_restart_full_duration() {
    let backend = Arc::new(MemoryLocalStorage::new());
    backend
        .set_item(
            KEY,
            r#"[{"id":1700000000000,"link":"https://bit.ly/legacy","expirationTime":1}]"#,
        )
        .unwrap();

    let service = service_with(backend.clone(), FakeShortener::ok());
    let report = service.load_and_arm().unwrap();
    assert_eq!(report.armed, 1);
    assert!(service.is_scheduled(1_700_000_000_000));

    tokio::time::sleep(Duration::from_secs(59)).await;
    assert_eq!(service.len(), 1);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(service.is_empty());
}

#[tokio::test]
async fn test_malformed_storage_loads_empty() {
    let backend = Arc::new(MemoryLocalStorage::new());
    backend.set_item(KEY, "{not json").unwrap();

    let service = service_with(backend, FakeShortener::ok());
    let report = service.load_and_arm().unwrap();

    assert_eq!(report.armed, 0);
    assert!(service.is_empty());
}

#[tokio::test]
async fn test_records_without_expiration_are_not_armed() {
    let backend = Arc::new(MemoryLocalStorage::new());
    backend
        .set_item(KEY, r#"[{"id":5,"link":"https://bit.ly/keep"}]"#)
        .unwrap();

    let service = service_with(backend, FakeShortener::ok());
    let report = service.load_and_arm().unwrap();

    assert_eq!(report.armed, 0);
    assert_eq!(service.len(), 1);
    assert!(!service.is_scheduled(5));
}

// =============================================================================
// Shared data directory
// =============================================================================

fn file_service(dir: &TempDir) -> Arc<LinkService> {
    let service = LinkService::new(
        LinkStore::new(Arc::new(FileLocalStorage::new(dir.path())), KEY),
        FakeShortener::ok(),
    );
    service.load_and_arm().unwrap();
    service
}

fn persisted_ids(dir: &TempDir) -> Vec<u64> {
    let storage = FileLocalStorage::new(dir.path());
    match storage.get_item(KEY).unwrap() {
        Some(raw) => serde_json::from_str::<Vec<LinkRecord>>(&raw)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect(),
        None => Vec::new(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_expiry_keeps_links_stored_by_another_process() {
    let dir = TempDir::new().unwrap();
    let watcher = file_service(&dir);
    let short_lived = watcher
        .submit("https://a.example", Some(ExpirationChoice::OneMinute))
        .await
        .unwrap();

    // 一次性命令：加载、提交、退出
    let oneshot = file_service(&dir);
    let kept = oneshot
        .submit("https://b.example", Some(ExpirationChoice::FiveHours))
        .await
        .unwrap();
    oneshot.shutdown();
    drop(oneshot);
    assert!(persisted_ids(&dir).contains(&kept.id));

    tokio::time::sleep(Duration::from_secs(61)).await;

    assert_eq!(persisted_ids(&dir), vec![kept.id]);
    assert!(watcher.get(short_lived.id).is_none());
    assert!(watcher.get(kept.id).is_some());
    assert!(watcher.is_scheduled(kept.id));
    watcher.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_delete_keeps_links_stored_by_another_process() {
    let dir = TempDir::new().unwrap();
    let tui = file_service(&dir);
    let doomed = tui
        .submit("https://a.example", Some(ExpirationChoice::OneHour))
        .await
        .unwrap();

    let oneshot = file_service(&dir);
    let kept = oneshot
        .submit("https://b.example", Some(ExpirationChoice::OneHour))
        .await
        .unwrap();
    oneshot.shutdown();

    assert!(tui.remove(doomed.id).unwrap());
    assert_eq!(persisted_ids(&dir), vec![kept.id]);
    assert_eq!(tui.len(), 1);
    tui.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_sync_adopts_and_expires_foreign_links() {
    let dir = TempDir::new().unwrap();
    let watcher = file_service(&dir);

    let oneshot = file_service(&dir);
    let foreign = oneshot
        .submit("https://b.example", Some(ExpirationChoice::OneMinute))
        .await
        .unwrap();
    oneshot.shutdown();
    assert!(watcher.is_empty());

    let report = watcher.sync().unwrap();
    assert_eq!(report.armed, 1);
    assert!(watcher.is_scheduled(foreign.id));
    assert_eq!(watcher.sync().unwrap().armed, 0);

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert!(watcher.is_empty());
    assert!(persisted_ids(&dir).is_empty());
}

// =============================================================================
// Persistence failures
// =============================================================================

/// Memory storage whose writes can be switched off
#[derive(Default)]
struct FlakyStorage {
    inner: MemoryLocalStorage,
    fail_writes: AtomicBool,
}

impl LocalStorage for FlakyStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ShortkeepError::file_operation("disk full"));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.inner.remove_item(key)
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}

#[tokio::test(start_paused = true)]
async fn test_failed_expiration_write_is_retried() {
    let backend = Arc::new(FlakyStorage::default());
    let service = LinkService::new(LinkStore::new(backend.clone(), KEY), FakeShortener::ok());
    let record = service
        .submit("https://example.com", Some(ExpirationChoice::OneMinute))
        .await
        .unwrap();

    backend.fail_writes.store(true, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(service.list(), vec![record.clone()]);
    assert!(service.is_scheduled(record.id));

    backend.fail_writes.store(false, Ordering::SeqCst);
    tokio::time::sleep(EXPIRE_RETRY_DELAY + Duration::from_secs(1)).await;
    assert!(service.is_empty());
    assert!(!service.is_scheduled(record.id));
    assert_eq!(backend.inner.get_item(KEY).unwrap().as_deref(), Some("[]"));
}
