use geotxt_application::ports::GeoLookup;
use geotxt_domain::{Country, DomainError, GeoRecord, Locality, Location, Postal, Subdivision};
use maxminddb::Reader;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::IpAddr;

/// One parsed MMDB file, serving lookups for a single snapshot generation.
pub struct MmdbIndex {
    reader: Reader<Vec<u8>>,
}

impl MmdbIndex {
    /// Parse raw (already decompressed) database bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, DomainError> {
        let reader =
            Reader::from_source(bytes).map_err(|e| DomainError::LoadFailed(e.to_string()))?;
        Ok(Self { reader })
    }
}

impl GeoLookup for MmdbIndex {
    fn lookup(&self, ip: IpAddr) -> Result<GeoRecord, DomainError> {
        let result = self
            .reader
            .lookup(ip)
            .map_err(|e| DomainError::LookupFailed(e.to_string()))?;

        if !result.has_data() {
            return Err(DomainError::RecordNotFound(ip.to_string()));
        }

        let city: CityData = result
            .decode()
            .map_err(|e| DomainError::LookupFailed(e.to_string()))?
            .ok_or_else(|| DomainError::RecordNotFound(ip.to_string()))?;

        Ok(city.into())
    }
}

// Decode targets mirroring the MMDB city schema. The stock geoip2 structs
// expose a fixed set of languages; the full names maps are needed here
// because the answer language is configuration.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CityData {
    country: CountryData,
    subdivisions: Vec<SubdivisionData>,
    city: LocalityData,
    postal: PostalData,
    location: LocationData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CountryData {
    iso_code: String,
    names: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubdivisionData {
    iso_code: String,
    names: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LocalityData {
    names: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PostalData {
    code: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LocationData {
    latitude: f64,
    longitude: f64,
    metro_code: u16,
    time_zone: String,
}

impl From<CityData> for GeoRecord {
    fn from(data: CityData) -> Self {
        GeoRecord {
            country: Country {
                iso_code: data.country.iso_code,
                names: data.country.names,
            },
            subdivisions: data
                .subdivisions
                .into_iter()
                .map(|s| Subdivision {
                    iso_code: s.iso_code,
                    names: s.names,
                })
                .collect(),
            city: Locality {
                names: data.city.names,
            },
            postal: Postal {
                code: data.postal.code,
            },
            location: Location {
                latitude: data.location.latitude,
                longitude: data.location.longitude,
                metro_code: u32::from(data.location.metro_code),
                time_zone: data.location.time_zone,
            },
        }
    }
}
