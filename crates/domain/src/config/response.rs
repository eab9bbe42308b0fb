use crate::response::TxtEncoding;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResponseConfig {
    /// Language key for localized names, e.g. country name.
    #[serde(default = "default_language")]
    pub language: String,

    /// "joined" packs all fields into one TXT string, "segmented" emits one
    /// character-string per field.
    #[serde(default)]
    pub output_mode: TxtEncoding,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            output_mode: TxtEncoding::default(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}
