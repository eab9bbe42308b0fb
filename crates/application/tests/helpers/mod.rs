pub mod mocks;

use geotxt_domain::{Country, GeoRecord, Locality, Location, Postal, Subdivision};
use std::collections::BTreeMap;

pub fn names(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn sample_record() -> GeoRecord {
    GeoRecord {
        country: Country {
            iso_code: "US".to_string(),
            names: names(&[("en", "United States")]),
        },
        subdivisions: vec![Subdivision {
            iso_code: "CA".to_string(),
            names: names(&[("en", "California")]),
        }],
        city: Locality {
            names: names(&[("en", "Mountain View")]),
        },
        postal: Postal {
            code: "94043".to_string(),
        },
        location: Location {
            latitude: 37.419200,
            longitude: -122.057400,
            metro_code: 807,
            time_zone: "America/Los_Angeles".to_string(),
        },
    }
}
