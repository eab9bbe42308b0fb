use std::collections::BTreeMap;

/// One geolocation answer for a single IP address.
///
/// Produced fresh per lookup by the database adapter; localized names are
/// keyed by language code ("en", "pt-BR", ...) exactly as stored in the
/// backing database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoRecord {
    pub country: Country,
    pub subdivisions: Vec<Subdivision>,
    pub city: Locality,
    pub postal: Postal,
    pub location: Location,
}

impl GeoRecord {
    /// The first-level administrative region, when the record has one.
    pub fn subdivision(&self) -> Option<&Subdivision> {
        self.subdivisions.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Country {
    pub iso_code: String,
    pub names: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subdivision {
    pub iso_code: String,
    pub names: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Locality {
    pub names: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Postal {
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub metro_code: u32,
    pub time_zone: String,
}
