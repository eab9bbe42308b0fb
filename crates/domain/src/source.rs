use std::fmt;
use std::path::PathBuf;

/// Where the geo database comes from.
///
/// A string is remote when it parses as an absolute URI with a non-empty
/// scheme; everything else, malformed input included, is treated as a local
/// path so the failure surfaces at open time instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Local(PathBuf),
    Remote(String),
}

impl DataSource {
    pub fn resolve(source: &str) -> Self {
        match url::Url::parse(source) {
            Ok(parsed) if !parsed.scheme().is_empty() => DataSource::Remote(source.to_string()),
            _ => DataSource::Local(PathBuf::from(source)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DataSource::Remote(_))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Local(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => write!(f, "{}", url),
        }
    }
}
