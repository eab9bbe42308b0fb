use std::sync::Arc;

/// Lifecycle notifications emitted by the geo database manager.
///
/// `Opened` fires after every successful load (including refreshes),
/// `Error` after a failed refresh attempt, `Closed` exactly once after the
/// refresh task has fully stopped.
#[derive(Debug, Clone)]
pub enum DatabaseEvent {
    Opened { source: Arc<str> },
    Error { cause: String },
    Closed,
}
