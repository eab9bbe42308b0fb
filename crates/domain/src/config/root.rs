use serde::{Deserialize, Serialize};

use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::response::ResponseConfig;
use super::server::ServerConfig;

/// Main configuration structure for GeoTXT DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, port, zone suffix)
    #[serde(default)]
    pub server: ServerConfig,

    /// Geo database source and refresh schedule
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Answer formatting
    #[serde(default)]
    pub response: ResponseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. geotxt-dns.toml in current directory
    /// 3. /etc/geotxt-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("geotxt-dns.toml").exists() {
            Self::from_file("geotxt-dns.toml")?
        } else if std::path::Path::new("/etc/geotxt-dns/config.toml").exists() {
            Self::from_file("/etc/geotxt-dns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(domain) = overrides.domain {
            self.server.domain = Some(domain);
        }
        if let Some(source) = overrides.database_source {
            self.database.source = source;
        }
        if let Some(secs) = overrides.update_interval_secs {
            self.database.update_interval_secs = secs;
        }
        if let Some(secs) = overrides.max_retry_interval_secs {
            self.database.max_retry_interval_secs = secs;
        }
        if let Some(lang) = overrides.language {
            self.response.language = lang;
        }
        if let Some(mode) = overrides.output_mode {
            self.response.output_mode = mode;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.silent {
            self.logging.silent = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.database.source.is_empty() {
            return Err(ConfigError::Validation(
                "Database source cannot be empty".to_string(),
            ));
        }

        if self.database.update_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Update interval cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub domain: Option<String>,
    pub database_source: Option<String>,
    pub update_interval_secs: Option<u64>,
    pub max_retry_interval_secs: Option<u64>,
    pub language: Option<String>,
    pub output_mode: Option<crate::response::TxtEncoding>,
    pub log_level: Option<String>,
    pub silent: bool,
}
