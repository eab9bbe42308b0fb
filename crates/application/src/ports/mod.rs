mod address_picker;
mod geo_database;
mod hostname_resolver;
mod snapshot_loader;

pub use address_picker::AddressPicker;
pub use geo_database::{GeoLookup, GeoReader, GeoSnapshot};
pub use hostname_resolver::HostnameResolver;
pub use snapshot_loader::SnapshotLoader;

// Re-export for convenience
pub use geotxt_domain::GeoRecord;
