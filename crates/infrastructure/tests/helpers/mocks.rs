use async_trait::async_trait;
use geotxt_application::ports::{GeoLookup, GeoSnapshot, SnapshotLoader};
use geotxt_domain::{Country, DomainError, GeoRecord, Locality, Location, Postal};
use std::collections::VecDeque;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Lookup capability whose record encodes its snapshot generation in every
/// field, so tests can detect cross-generation field mixing.
pub struct GenerationLookup(pub u32);

impl GeoLookup for GenerationLookup {
    fn lookup(&self, _ip: IpAddr) -> Result<GeoRecord, DomainError> {
        let generation = self.0;
        let mut country_names = std::collections::BTreeMap::new();
        country_names.insert("en".to_string(), format!("Generation {}", generation));
        let mut city_names = std::collections::BTreeMap::new();
        city_names.insert("en".to_string(), format!("City {}", generation));

        Ok(GeoRecord {
            country: Country {
                iso_code: format!("G{}", generation),
                names: country_names,
            },
            subdivisions: Vec::new(),
            city: Locality { names: city_names },
            postal: Postal {
                code: generation.to_string(),
            },
            location: Location {
                latitude: f64::from(generation),
                longitude: f64::from(generation),
                metro_code: generation,
                time_zone: format!("Zone/{}", generation),
            },
        })
    }
}

/// Asserts every field of a record agrees on one generation, returning it.
pub fn record_generation(record: &GeoRecord) -> u32 {
    let generation = record.location.metro_code;
    assert_eq!(record.country.iso_code, format!("G{}", generation));
    assert_eq!(
        record.country.names.get("en").map(String::as_str),
        Some(format!("Generation {}", generation).as_str())
    );
    assert_eq!(record.postal.code, generation.to_string());
    assert_eq!(record.location.time_zone, format!("Zone/{}", generation));
    assert_eq!(record.location.latitude, f64::from(generation));
    generation
}

/// Snapshot loader driven by a script of successes/failures; once the script
/// is exhausted every further load uses the default outcome.
pub struct ScriptedLoader {
    origin: String,
    script: Mutex<VecDeque<bool>>,
    default_ok: bool,
    generation: AtomicU32,
    loads: AtomicU32,
}

impl ScriptedLoader {
    pub fn new(default_ok: bool) -> Self {
        Self {
            origin: "mock://geo".to_string(),
            script: Mutex::new(VecDeque::new()),
            default_ok,
            generation: AtomicU32::new(0),
            loads: AtomicU32::new(0),
        }
    }

    pub fn with_script(self, steps: &[bool]) -> Self {
        self.script.lock().unwrap().extend(steps.iter().copied());
        self
    }

    /// Total number of load attempts so far.
    pub fn loads(&self) -> u32 {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of snapshots produced so far.
    pub fn generation(&self) -> u32 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotLoader for ScriptedLoader {
    async fn load(&self) -> Result<GeoSnapshot, DomainError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let ok = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default_ok);

        if ok {
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(GeoSnapshot::new(
                self.origin.clone(),
                Arc::new(GenerationLookup(generation)),
            ))
        } else {
            Err(DomainError::FetchFailed("scripted failure".to_string()))
        }
    }

    fn origin(&self) -> &str {
        &self.origin
    }
}
