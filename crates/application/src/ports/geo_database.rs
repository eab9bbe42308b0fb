use geotxt_domain::{DomainError, GeoRecord};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::SystemTime;

/// Read side of the geo database as seen by the query router.
///
/// Implementations must serve lookups from the current snapshot without
/// blocking on an in-flight refresh.
pub trait GeoReader: Send + Sync {
    fn lookup(&self, ip: IpAddr) -> Result<GeoRecord, DomainError>;
}

/// Lookup capability of one loaded database generation.
pub trait GeoLookup: Send + Sync {
    fn lookup(&self, ip: IpAddr) -> Result<GeoRecord, DomainError>;
}

/// One immutable, fully-loaded generation of the geo database.
///
/// Replaced wholesale by the manager on refresh; never mutated in place.
#[derive(Clone)]
pub struct GeoSnapshot {
    origin: Arc<str>,
    loaded_at: SystemTime,
    index: Arc<dyn GeoLookup>,
}

impl GeoSnapshot {
    pub fn new(origin: impl Into<Arc<str>>, index: Arc<dyn GeoLookup>) -> Self {
        Self {
            origin: origin.into(),
            loaded_at: SystemTime::now(),
            index,
        }
    }

    pub fn origin(&self) -> &Arc<str> {
        &self.origin
    }

    pub fn loaded_at(&self) -> SystemTime {
        self.loaded_at
    }

    pub fn lookup(&self, ip: IpAddr) -> Result<GeoRecord, DomainError> {
        self.index.lookup(ip)
    }
}

impl std::fmt::Debug for GeoSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoSnapshot")
            .field("origin", &self.origin)
            .field("loaded_at", &self.loaded_at)
            .finish()
    }
}
