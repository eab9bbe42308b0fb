pub mod server;

pub use server::GeoTxtHandler;
