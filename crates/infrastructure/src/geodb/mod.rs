mod events;
mod fetch;
mod manager;
mod reader;

pub use events::{EventEmitter, EVENT_QUEUE_DEPTH};
pub use fetch::{FileSnapshotLoader, HttpSnapshotLoader};
pub use manager::GeoDatabase;
pub use reader::MmdbIndex;
