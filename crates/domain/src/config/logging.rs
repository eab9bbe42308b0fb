use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Suppress per-request and database-event log lines.
    #[serde(default)]
    pub silent: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            silent: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
