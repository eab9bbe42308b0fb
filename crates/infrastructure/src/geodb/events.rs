use arc_swap::ArcSwapOption;
use geotxt_domain::DatabaseEvent;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Events buffered for an observer that is not currently draining.
pub const EVENT_QUEUE_DEPTH: usize = 32;

/// Single-observer event fan-out for the database manager.
///
/// Delivery is strictly non-blocking: events beyond the queue depth are
/// dropped (drop-new) so a slow or absent observer can never stall the
/// refresh task or `close()`.
pub struct EventEmitter {
    observer: ArcSwapOption<mpsc::Sender<DatabaseEvent>>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self {
            observer: ArcSwapOption::empty(),
        }
    }

    /// Attach the observer. A later call replaces any earlier one.
    pub fn subscribe(&self) -> mpsc::Receiver<DatabaseEvent> {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        self.observer.store(Some(Arc::new(tx)));
        rx
    }

    pub fn emit(&self, event: DatabaseEvent) {
        if let Some(tx) = &*self.observer.load() {
            let _ = tx.try_send(event);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.observer.load().is_some()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("subscribed", &self.is_subscribed())
            .finish()
    }
}
