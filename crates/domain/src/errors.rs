use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Unsupported question: {0}")]
    UnsupportedQuery(String),

    #[error("Hostname did not resolve: {0}")]
    HostUnresolved(String),

    #[error("Address not found in geo database: {0}")]
    RecordNotFound(String),

    #[error("Geo database lookup failed: {0}")]
    LookupFailed(String),

    #[error("Failed to load geo database: {0}")]
    LoadFailed(String),

    #[error("Failed to fetch geo database: {0}")]
    FetchFailed(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True when the failure means "this name has no answer" (NXDOMAIN)
    /// rather than "the server could not produce one" (SERVFAIL).
    pub fn is_name_error(&self) -> bool {
        matches!(
            self,
            DomainError::UnsupportedQuery(_) | DomainError::HostUnresolved(_)
        )
    }
}
