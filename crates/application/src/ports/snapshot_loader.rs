use super::GeoSnapshot;
use async_trait::async_trait;
use geotxt_domain::DomainError;

/// Fetches and parses one complete database snapshot from its source.
///
/// The manager calls this once at open time and then once per refresh tick;
/// at most one load is in flight at a time.
#[async_trait]
pub trait SnapshotLoader: Send + Sync {
    async fn load(&self) -> Result<GeoSnapshot, DomainError>;

    /// Stable identifier of the source (path or URL), used in events.
    fn origin(&self) -> &str;
}
