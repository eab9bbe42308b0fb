use async_trait::async_trait;
use geotxt_application::ports::{AddressPicker, GeoReader, HostnameResolver};
use geotxt_domain::{DomainError, GeoRecord};
use std::net::IpAddr;
use std::sync::Mutex;

/// Geo reader returning a fixed record (or error) and remembering the last
/// address it was asked about.
pub struct MockGeoReader {
    result: Result<GeoRecord, DomainError>,
    last_ip: Mutex<Option<IpAddr>>,
}

impl MockGeoReader {
    pub fn with_record(record: GeoRecord) -> Self {
        Self {
            result: Ok(record),
            last_ip: Mutex::new(None),
        }
    }

    pub fn with_error(error: DomainError) -> Self {
        Self {
            result: Err(error),
            last_ip: Mutex::new(None),
        }
    }

    pub fn last_ip(&self) -> Option<IpAddr> {
        *self.last_ip.lock().unwrap()
    }
}

impl GeoReader for MockGeoReader {
    fn lookup(&self, ip: IpAddr) -> Result<GeoRecord, DomainError> {
        *self.last_ip.lock().unwrap() = Some(ip);
        self.result.clone()
    }
}

/// Hostname resolver returning a canned address list (or error) and
/// remembering the last hostname it saw.
pub struct MockHostnameResolver {
    result: Result<Vec<IpAddr>, DomainError>,
    last_hostname: Mutex<Option<String>>,
}

impl MockHostnameResolver {
    pub fn with_addresses(addresses: Vec<IpAddr>) -> Self {
        Self {
            result: Ok(addresses),
            last_hostname: Mutex::new(None),
        }
    }

    pub fn with_error() -> Self {
        Self {
            result: Err(DomainError::HostUnresolved("mock".to_string())),
            last_hostname: Mutex::new(None),
        }
    }

    pub fn unreachable() -> Self {
        Self::with_addresses(Vec::new())
    }

    pub fn last_hostname(&self) -> Option<String> {
        self.last_hostname.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostnameResolver for MockHostnameResolver {
    async fn resolve(&self, hostname: &str) -> Result<Vec<IpAddr>, DomainError> {
        *self.last_hostname.lock().unwrap() = Some(hostname.to_string());
        self.result.clone()
    }
}

/// Picker that always returns the same index.
pub struct FixedPicker(pub usize);

impl AddressPicker for FixedPicker {
    fn pick(&self, count: usize) -> usize {
        self.0.min(count - 1)
    }
}
