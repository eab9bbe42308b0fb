//! GeoTXT DNS Domain Layer
pub mod config;
pub mod errors;
pub mod event;
pub mod geo_record;
pub mod question;
pub mod refresh;
pub mod response;
pub mod source;

pub use config::Config;
pub use errors::DomainError;
pub use event::DatabaseEvent;
pub use geo_record::{Country, GeoRecord, Locality, Location, Postal, Subdivision};
pub use question::{Question, RecordClass, RecordType};
pub use refresh::{BackoffPolicy, BackoffState, UpdatePolicy};
pub use response::{ResponseRecord, TxtEncoding};
pub use source::DataSource;
