use crate::refresh::UpdatePolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Historical GeoLite2 City download location, kept as the default source.
pub const DEFAULT_DATABASE_URL: &str =
    "http://geolite.maxmind.com/download/geoip/database/GeoLite2-City.mmdb.gz";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local file path or download URL for the geo database.
    #[serde(default = "default_source")]
    pub source: String,

    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,

    #[serde(default = "default_retry_base_secs")]
    pub retry_base_secs: u64,

    #[serde(default = "default_max_retry_interval_secs")]
    pub max_retry_interval_secs: u64,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn update_policy(&self) -> UpdatePolicy {
        UpdatePolicy::new(
            Duration::from_secs(self.update_interval_secs),
            Duration::from_secs(self.max_retry_interval_secs),
        )
        .with_retry_base(Duration::from_secs(self.retry_base_secs))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            update_interval_secs: default_update_interval_secs(),
            retry_base_secs: default_retry_base_secs(),
            max_retry_interval_secs: default_max_retry_interval_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_source() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_update_interval_secs() -> u64 {
    86_400
}

fn default_retry_base_secs() -> u64 {
    5
}

fn default_max_retry_interval_secs() -> u64 {
    3_600
}

fn default_fetch_timeout_secs() -> u64 {
    300
}
