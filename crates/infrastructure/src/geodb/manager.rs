use super::events::EventEmitter;
use super::fetch::{FileSnapshotLoader, HttpSnapshotLoader};
use arc_swap::ArcSwap;
use geotxt_application::ports::{GeoReader, GeoSnapshot, SnapshotLoader};
use geotxt_domain::{
    BackoffPolicy, BackoffState, DataSource, DatabaseEvent, DomainError, GeoRecord, UpdatePolicy,
};
use std::net::IpAddr;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Upper bound on waiting for the refresh task to acknowledge shutdown;
/// past it the task is aborted.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Self-updating geo database.
///
/// Owns the one current [`GeoSnapshot`]; lookups read it through a single
/// atomic load and never block on a refresh. Remote-backed managers run one
/// background task that fetches a fresh snapshot on the update schedule,
/// swapping it in atomically and falling back to capped exponential backoff
/// after failures.
pub struct GeoDatabase {
    shared: Arc<Shared>,
    shutdown: CancellationToken,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

struct Shared {
    snapshot: ArcSwap<GeoSnapshot>,
    events: EventEmitter,
}

impl GeoDatabase {
    /// Open from a source string, dispatching on its shape: URL means remote
    /// with background refresh, anything else a local file loaded once.
    pub async fn open(
        source: &str,
        policy: UpdatePolicy,
        fetch_timeout: Duration,
    ) -> Result<Self, DomainError> {
        match DataSource::resolve(source) {
            DataSource::Local(path) => Self::open_local(path).await,
            DataSource::Remote(url) => Self::open_remote(&url, policy, fetch_timeout).await,
        }
    }

    /// Load a local database file once; lookups always serve this snapshot.
    pub async fn open_local(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let loader = Arc::new(FileSnapshotLoader::new(path.as_ref()));
        Self::open_with_loader(loader).await
    }

    /// Fetch a remote database once, then keep it fresh in the background.
    /// A failed initial fetch returns the error and starts nothing.
    pub async fn open_remote(
        url: &str,
        policy: UpdatePolicy,
        fetch_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let loader = Arc::new(HttpSnapshotLoader::new(url, fetch_timeout)?);
        Self::open_updating_with_loader(loader, policy).await
    }

    /// One synchronous load, no background refresh.
    pub async fn open_with_loader(loader: Arc<dyn SnapshotLoader>) -> Result<Self, DomainError> {
        let snapshot = loader.load().await?;
        info!(source = %loader.origin(), "geo database loaded");

        let db = Self::from_snapshot(snapshot);
        db.shared.events.emit(DatabaseEvent::Opened {
            source: Arc::from(loader.origin()),
        });
        Ok(db)
    }

    /// One synchronous load, then a refresh task on `policy`'s schedule.
    pub async fn open_updating_with_loader(
        loader: Arc<dyn SnapshotLoader>,
        policy: UpdatePolicy,
    ) -> Result<Self, DomainError> {
        let db = Self::open_with_loader(Arc::clone(&loader)).await?;

        let task = tokio::spawn(refresh_loop(
            Arc::clone(&db.shared),
            loader,
            policy,
            db.shutdown.clone(),
        ));
        *db.refresh_task.lock().await = Some(task);
        Ok(db)
    }

    fn from_snapshot(snapshot: GeoSnapshot) -> Self {
        Self {
            shared: Arc::new(Shared {
                snapshot: ArcSwap::from_pointee(snapshot),
                events: EventEmitter::new(),
            }),
            shutdown: CancellationToken::new(),
            refresh_task: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }

    /// Source identifier of the currently served snapshot.
    pub fn origin(&self) -> Arc<str> {
        self.shared.snapshot.load().origin().clone()
    }

    /// Attach the (single) lifecycle observer. Delivery never blocks the
    /// refresh task; events are dropped instead when the queue is full.
    pub fn subscribe(&self) -> mpsc::Receiver<DatabaseEvent> {
        self.shared.events.subscribe()
    }

    /// Stop the refresh task, wait for it to acknowledge (bounded), then
    /// emit `Closed`. Safe to call more than once; later calls return
    /// immediately.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        self.shutdown.cancel();
        let task = self.refresh_task.lock().await.take();
        if let Some(mut task) = task {
            if timeout(CLOSE_TIMEOUT, &mut task).await.is_err() {
                warn!("refresh task did not stop in time, aborting");
                task.abort();
                let _ = task.await;
            }
        }

        self.shared.events.emit(DatabaseEvent::Closed);
        info!("geo database closed");
    }
}

impl GeoReader for GeoDatabase {
    fn lookup(&self, ip: IpAddr) -> Result<GeoRecord, DomainError> {
        let snapshot = self.shared.snapshot.load();
        snapshot.lookup(ip)
    }
}

/// Runs until cancelled. Sleeps for the update interval (or the current
/// backoff delay while retrying), fetches one snapshot, swaps it in on
/// success. Only ever one fetch in flight.
async fn refresh_loop(
    shared: Arc<Shared>,
    loader: Arc<dyn SnapshotLoader>,
    policy: UpdatePolicy,
    shutdown: CancellationToken,
) {
    let backoff_policy = policy.backoff();
    let mut backoff = BackoffState::new();

    loop {
        let delay = backoff.delay().unwrap_or(policy.update_interval);

        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = sleep(delay) => {}
        }

        let result = tokio::select! {
            _ = shutdown.cancelled() => break,
            result = loader.load() => result,
        };

        match result {
            Ok(snapshot) => {
                shared.snapshot.store(Arc::new(snapshot));
                info!(source = %loader.origin(), "geo database refreshed");
                shared.events.emit(DatabaseEvent::Opened {
                    source: Arc::from(loader.origin()),
                });
                backoff.reset();
            }
            Err(e) => {
                let retry_in = backoff.advance(&backoff_policy, jitter(&backoff_policy));
                warn!(
                    error = %e,
                    attempt = backoff.attempt(),
                    retry_in_secs = retry_in.as_secs(),
                    "geo database refresh failed"
                );
                shared.events.emit(DatabaseEvent::Error {
                    cause: e.to_string(),
                });
            }
        }
    }

    debug!("refresh task stopped");
}

fn jitter(policy: &BackoffPolicy) -> Duration {
    let base_ms = policy.base().as_millis() as u64;
    if base_ms == 0 {
        Duration::ZERO
    } else {
        Duration::from_millis(fastrand::u64(..=base_ms))
    }
}
