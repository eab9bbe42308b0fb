//! GeoTXT DNS Infrastructure Layer
pub mod dns;
pub mod geodb;
pub mod system;
