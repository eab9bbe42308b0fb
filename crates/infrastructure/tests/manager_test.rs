use geotxt_application::ports::GeoReader;
use geotxt_domain::{DatabaseEvent, DomainError, UpdatePolicy};
use geotxt_infrastructure::geodb::{FileSnapshotLoader, GeoDatabase, EVENT_QUEUE_DEPTH};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::Receiver;
use tokio::time::{sleep, timeout};

mod helpers;
use geotxt_application::ports::SnapshotLoader;
use helpers::mocks::{record_generation, ScriptedLoader};

fn ip() -> IpAddr {
    "8.8.8.8".parse().unwrap()
}

/// Tight schedule so refreshes happen within a test's lifetime.
fn fast_policy() -> UpdatePolicy {
    UpdatePolicy::new(Duration::from_millis(10), Duration::from_millis(40))
        .with_retry_base(Duration::from_millis(10))
}

fn drain(receiver: &mut Receiver<DatabaseEvent>) -> Vec<DatabaseEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_initial_load_failure_propagates_and_starts_nothing() {
    let loader = Arc::new(ScriptedLoader::new(false));

    let result = GeoDatabase::open_updating_with_loader(loader.clone(), fast_policy()).await;
    assert!(matches!(result, Err(DomainError::FetchFailed(_))));

    // no refresh task was started
    sleep(Duration::from_millis(50)).await;
    assert_eq!(loader.loads(), 1);
}

#[tokio::test]
async fn test_static_open_always_serves_the_same_snapshot() {
    let loader = Arc::new(ScriptedLoader::new(true));
    let db = GeoDatabase::open_with_loader(loader.clone()).await.unwrap();

    sleep(Duration::from_millis(50)).await;
    assert_eq!(loader.loads(), 1);
    assert_eq!(record_generation(&db.lookup(ip()).unwrap()), 1);
    assert_eq!(&*db.origin(), "mock://geo");

    db.close().await;
}

#[tokio::test]
async fn test_refresh_swaps_in_new_generations() {
    let loader = Arc::new(ScriptedLoader::new(true));
    let db = GeoDatabase::open_updating_with_loader(loader.clone(), fast_policy())
        .await
        .unwrap();
    let mut events = db.subscribe();

    sleep(Duration::from_millis(100)).await;

    let generation = record_generation(&db.lookup(ip()).unwrap());
    assert!(generation > 1, "expected a refreshed snapshot, got {generation}");

    let opened = drain(&mut events)
        .into_iter()
        .filter(|e| matches!(e, DatabaseEvent::Opened { .. }))
        .count();
    assert!(opened >= 1);

    db.close().await;
}

#[tokio::test]
async fn test_lookup_is_consistent_with_one_generation_during_swaps() {
    let loader = Arc::new(ScriptedLoader::new(true));
    let policy = UpdatePolicy::new(Duration::from_millis(1), Duration::from_millis(4))
        .with_retry_base(Duration::from_millis(1));
    let db = Arc::new(
        GeoDatabase::open_updating_with_loader(loader, policy)
            .await
            .unwrap(),
    );

    let mut readers = Vec::new();
    for _ in 0..8 {
        let db = Arc::clone(&db);
        readers.push(tokio::spawn(async move {
            let mut last_seen = 0;
            for _ in 0..200 {
                let record = db.lookup(ip()).unwrap();
                // every field must belong to a single generation, and
                // generations never move backwards
                let generation = record_generation(&record);
                assert!(generation >= last_seen);
                last_seen = generation;
                tokio::task::yield_now().await;
            }
        }));
    }

    for reader in readers {
        reader.await.unwrap();
    }

    db.close().await;
}

#[tokio::test]
async fn test_refresh_failures_emit_errors_and_keep_serving_old_snapshot() {
    // initial load succeeds, every refresh after it fails
    let loader = Arc::new(ScriptedLoader::new(false).with_script(&[true]));
    let db = GeoDatabase::open_updating_with_loader(loader.clone(), fast_policy())
        .await
        .unwrap();
    let mut events = db.subscribe();

    sleep(Duration::from_millis(150)).await;

    assert!(loader.loads() >= 3, "retries expected, saw {}", loader.loads());
    assert_eq!(record_generation(&db.lookup(ip()).unwrap()), 1);

    let drained = drain(&mut events);
    assert!(drained
        .iter()
        .any(|e| matches!(e, DatabaseEvent::Error { .. })));
    assert!(!drained.iter().any(|e| matches!(e, DatabaseEvent::Closed)));

    db.close().await;
}

#[tokio::test]
async fn test_success_after_failures_resumes_swapping() {
    let loader = Arc::new(ScriptedLoader::new(true).with_script(&[true, false, false]));
    let db = GeoDatabase::open_updating_with_loader(loader.clone(), fast_policy())
        .await
        .unwrap();

    sleep(Duration::from_millis(300)).await;

    assert!(loader.generation() >= 2);
    assert!(record_generation(&db.lookup(ip()).unwrap()) >= 2);

    db.close().await;
}

#[tokio::test]
async fn test_close_stops_refresh_and_emits_closed_once() {
    let loader = Arc::new(ScriptedLoader::new(true));
    let db = GeoDatabase::open_updating_with_loader(loader.clone(), fast_policy())
        .await
        .unwrap();
    let mut events = db.subscribe();

    sleep(Duration::from_millis(50)).await;
    timeout(Duration::from_secs(1), db.close())
        .await
        .expect("close must not hang");

    let loads_at_close = loader.loads();
    sleep(Duration::from_millis(100)).await;
    assert_eq!(loader.loads(), loads_at_close, "refresh survived close");

    let closed = drain(&mut events)
        .into_iter()
        .filter(|e| matches!(e, DatabaseEvent::Closed))
        .count();
    assert_eq!(closed, 1);
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let loader = Arc::new(ScriptedLoader::new(true));
    let db = GeoDatabase::open_updating_with_loader(loader, fast_policy())
        .await
        .unwrap();
    let mut events = db.subscribe();

    db.close().await;
    db.close().await;
    db.close().await;

    let closed = drain(&mut events)
        .into_iter()
        .filter(|e| matches!(e, DatabaseEvent::Closed))
        .count();
    assert_eq!(closed, 1);
}

#[tokio::test]
async fn test_stuck_observer_never_stalls_refresh_or_close() {
    let loader = Arc::new(ScriptedLoader::new(true));
    let policy = UpdatePolicy::new(Duration::from_millis(1), Duration::from_millis(4))
        .with_retry_base(Duration::from_millis(1));
    let db = GeoDatabase::open_updating_with_loader(loader.clone(), policy)
        .await
        .unwrap();

    // subscribe but never drain: the queue fills and stays full
    let mut events = db.subscribe();

    sleep(Duration::from_millis(150)).await;
    let loads = loader.loads();
    assert!(
        loads as usize > EVENT_QUEUE_DEPTH + 4,
        "refresh stalled on a full event queue after {loads} loads"
    );

    timeout(Duration::from_secs(1), db.close())
        .await
        .expect("close must not hang on a stuck observer");

    // the buffered prefix survived, the overflow was dropped
    let drained = drain(&mut events);
    assert!(!drained.is_empty());
    assert!(drained.len() <= EVENT_QUEUE_DEPTH);
}

#[tokio::test]
async fn test_lookups_after_close_still_serve_the_last_snapshot() {
    let loader = Arc::new(ScriptedLoader::new(true));
    let db = GeoDatabase::open_updating_with_loader(loader, fast_policy())
        .await
        .unwrap();

    db.close().await;

    // in-flight readers are drained, not aborted; the snapshot stays valid
    assert!(db.lookup(ip()).is_ok());
}

#[tokio::test]
async fn test_open_local_with_unreadable_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.mmdb");

    let result = GeoDatabase::open_local(&missing).await;
    assert!(matches!(result, Err(DomainError::LoadFailed(_))));
}

#[tokio::test]
async fn test_file_loader_rejects_garbage_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.mmdb");
    std::fs::write(&path, b"definitely not a database").unwrap();

    let loader = FileSnapshotLoader::new(&path);
    let result = loader.load().await;
    assert!(matches!(result, Err(DomainError::LoadFailed(_))));
    assert_eq!(loader.origin(), path.display().to_string());
}
